use discotrack::types::Album;
use discotrack::utils::*;

// Helper function to create a test album
fn create_test_album(id: &str, name: &str, release_date: &str) -> Album {
    Album {
        id: id.to_string(),
        artist_id: "artist-1".to_string(),
        name: name.to_string(),
        release_date: release_date.to_string(),
        track_count: 1,
        album_type: "album".to_string(),
        spotify_url: format!("https://open.spotify.com/album/{}", id),
        spotify_uri: format!("spotify:album:{}", id),
        qr_code_url: scannable_url(&format!("spotify:album:{}", id)),
        image_large_uri: String::new(),
        image_medium_uri: String::new(),
        image_thumb_uri: String::new(),
    }
}

#[test]
fn test_scannable_url() {
    let url = scannable_url("spotify:track:abc123");
    assert!(url.starts_with("https://scannables.scdn.co/uri/plain/png/"));
    assert!(url.ends_with("spotify:track:abc123"));
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(999), "0:00");
    assert_eq!(format_duration(1_000), "0:01");
    assert_eq!(format_duration(65_000), "1:05");
    assert_eq!(format_duration(605_000), "10:05");
    assert_eq!(format_duration(3_600_000), "60:00");
}

#[test]
fn test_format_release_date_full_precision() {
    assert_eq!(format_release_date("2024-06-01"), "June 1, 2024");
    assert_eq!(format_release_date("2023-12-25"), "December 25, 2023");
}

#[test]
fn test_format_release_date_partial_precision() {
    // Year-only precision passes through
    assert_eq!(format_release_date("2024"), "2024");

    // Year-month precision drops the day
    assert_eq!(format_release_date("2024-06"), "June 2024");
}

#[test]
fn test_format_release_date_invalid() {
    assert_eq!(format_release_date(""), "Unknown Date");
    assert_eq!(format_release_date("not-a-date"), "Unknown Date");
    assert_eq!(format_release_date("abcd"), "Unknown Date");
}

#[test]
fn test_sanitize_title() {
    assert_eq!(sanitize_title("Test Song"), "Test-Song");
    assert_eq!(sanitize_title("Test Song!"), "Test-Song");
    assert_eq!(sanitize_title("  spaced  "), "spaced");
    assert_eq!(sanitize_title("under_score-dash"), "under_score-dash");
    assert_eq!(sanitize_title("Señor Söng"), "Señor-Söng");
    assert_eq!(sanitize_title("a/b\\c:d"), "abcd");
}

#[test]
fn test_parse_hex_color() {
    let black = parse_hex_color("#000000").unwrap();
    assert_eq!(black.0, [0, 0, 0, 255]);

    let orange = parse_hex_color("#FFAA00").unwrap();
    assert_eq!(orange.0, [255, 170, 0, 255]);

    // Leading hash is optional
    let white = parse_hex_color("ffffff").unwrap();
    assert_eq!(white.0, [255, 255, 255, 255]);
}

#[test]
fn test_parse_hex_color_invalid() {
    assert!(parse_hex_color("").is_err());
    assert!(parse_hex_color("#fff").is_err());
    assert!(parse_hex_color("#gggggg").is_err());
    assert!(parse_hex_color("#1234567").is_err());
}

#[test]
fn test_dedup_albums() {
    let mut albums = vec![
        create_test_album("id1", "Album 1", "2023-10-01"),
        create_test_album("id2", "Album 2", "2023-10-02"),
        create_test_album("id1", "Album 1 Duplicate", "2023-10-01"), // Duplicate
        create_test_album("id3", "Album 3", "2023-10-03"),
    ];

    dedup_albums(&mut albums);

    // Should have 3 unique albums
    assert_eq!(albums.len(), 3);

    // Should contain the first occurrence of each unique ID
    let ids: Vec<&String> = albums.iter().map(|a| &a.id).collect();
    assert_eq!(ids, vec!["id1", "id2", "id3"]);
    assert_eq!(albums[0].name, "Album 1");
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("plain"), "plain");
    assert_eq!(escape_html("a & b"), "a &amp; b");
    assert_eq!(escape_html("<tag>"), "&lt;tag&gt;");
    assert_eq!(escape_html("say \"hi\""), "say &quot;hi&quot;");
}
