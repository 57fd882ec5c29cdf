use std::collections::HashSet;

use chrono::NaiveDate;
use image::Rgba;

use crate::types::Album;

const SCANNABLES_URL: &str = "https://scannables.scdn.co/uri/plain/png/ffffff/black/640";

/// Scan-code image URL for a Spotify URI.
pub fn scannable_url(uri: &str) -> String {
    format!("{SCANNABLES_URL}/{uri}")
}

pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1_000;
    format!("{minutes}:{seconds:02}")
}

/// Renders a release date like "June 1, 2024". Spotify reports partial
/// precisions (year, year-month), which fall back to shorter forms.
pub fn format_release_date(date_str: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }

    match date_str.len() {
        4 if date_str.chars().all(|c| c.is_ascii_digit()) => date_str.to_string(),
        7 => match NaiveDate::parse_from_str(&format!("{date_str}-01"), "%Y-%m-%d") {
            Ok(date) => date.format("%B %Y").to_string(),
            Err(_) => "Unknown Date".to_string(),
        },
        _ => "Unknown Date".to_string(),
    }
}

/// Derives the story file stem from a track title: keep alphanumerics,
/// spaces, dashes and underscores, then turn spaces into dashes.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect();
    kept.trim().replace(' ', "-")
}

pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>, String> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid color '{value}', expected #rrggbb"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
    };
    Ok(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255]))
}

pub fn dedup_albums(albums: &mut Vec<Album>) {
    let mut seen_ids = HashSet::new();
    albums.retain(|album| seen_ids.insert(album.id.clone()));
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
