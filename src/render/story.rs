use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{
    Rgba, RgbaImage,
    imageops::{self, FilterType},
};
use imageproc::drawing::{draw_text_mut, text_size};
use reqwest::Client;

use crate::{
    error::RenderError,
    render::layout::{Alignment, StoryLayout},
    types::{Album, Track},
    utils,
};

/// Vertical gap between the title anchor and the artwork's top edge.
const TITLE_GAP: i64 = 100;
/// Vertical gap between the artwork's bottom edge and the banner.
const BANNER_GAP: i64 = 40;
const BANNER_FONT_SIZE: f32 = 45.0;
const CODE_BOTTOM_MARGIN: i64 = 60;
const SHADOW_OFFSET: i32 = 3;
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const SHADOW_COLOR: Rgba<u8> = Rgba([51, 51, 51, 255]);
/// Alpha of the black layer dimming the artwork behind the text.
const DIM_ALPHA: u8 = 128;

/// Composes the story image for one track and writes it as a PNG.
///
/// Layer order, back to front: background color fill, the album artwork
/// (downloaded, resized to the canvas width minus twice the configured
/// padding with its aspect ratio kept, dimmed, vertically centered plus
/// offset), the track title with a drop shadow, the streaming banner, and
/// the track's scan code at the bottom center.
///
/// The output path is derived from the sanitized track title
/// (`story_<title>.png` inside `output_dir`); an existing file at that path
/// is overwritten.
///
/// # Errors
///
/// - `RenderError::Artwork` / `RenderError::Code` - asset download failed;
///   not retried
/// - `RenderError::MissingFont` - a font file is configured but unreadable
/// - `RenderError::Layout` - the layout is invalid
///
/// A failed render leaves no partial output and does not affect persisted
/// catalog data.
pub async fn render_story(
    track: &Track,
    album: &Album,
    layout: &StoryLayout,
    output_dir: &Path,
) -> Result<PathBuf, RenderError> {
    layout.validate()?;
    let background =
        utils::parse_hex_color(&layout.image.background_color).map_err(RenderError::Layout)?;
    let width = layout.image.width;
    let height = layout.image.height;
    let mut canvas = RgbaImage::from_pixel(width, height, background);

    let art_bytes = fetch_asset(&album.image_large_uri)
        .await
        .map_err(RenderError::Artwork)?;
    let art = image::load_from_memory(&art_bytes)?;
    let art_width = width - layout.artwork.padding * 2;
    let art_height = ((art_width as u64 * art.height() as u64) / art.width() as u64) as u32;
    let mut art = art
        .resize_exact(art_width, art_height, FilterType::Lanczos3)
        .to_rgba8();
    let dim = RgbaImage::from_pixel(art_width, art_height, Rgba([0, 0, 0, DIM_ALPHA]));
    imageops::overlay(&mut art, &dim, 0, 0);

    let art_x = layout.artwork.padding as i64;
    let art_y = (height as i64 - art_height as i64) / 2 + layout.artwork.vertical_offset as i64;
    imageops::overlay(&mut canvas, &art, art_x, art_y);

    // text layers require a configured font; without one they are skipped
    if let Some(font_file) = &layout.title.font_file {
        let font = load_font(font_file)?;
        draw_title(&mut canvas, &font, layout, &track.name, art_y);
        draw_banner(&mut canvas, &font, layout, art_y + art_height as i64);
    }

    let code_bytes = fetch_asset(&track.qr_code_url)
        .await
        .map_err(RenderError::Code)?;
    let code = image::load_from_memory(&code_bytes)?;
    let code_width = layout.qr.size.min(width);
    let code_height = ((code_width as u64 * code.height() as u64) / code.width() as u64) as u32;
    let code = code
        .resize_exact(code_width, code_height, FilterType::Lanczos3)
        .to_rgba8();
    let code_x = (width as i64 - code_width as i64) / 2;
    let code_y = height as i64 - code_height as i64 - CODE_BOTTOM_MARGIN;
    imageops::overlay(&mut canvas, &code, code_x, code_y);

    let output_path = output_dir.join(format!(
        "story_{stem}.png",
        stem = utils::sanitize_title(&track.name)
    ));
    canvas.save(&output_path)?;
    Ok(output_path)
}

fn draw_title(
    canvas: &mut RgbaImage,
    font: &FontVec,
    layout: &StoryLayout,
    title: &str,
    art_top: i64,
) {
    let scale = PxScale::from(layout.title.font_size);
    let (text_width, text_height) = text_size(scale, font, title);
    let x = aligned_x(
        layout.title.alignment,
        canvas.width(),
        text_width,
        layout.artwork.padding,
    );
    let y = (art_top - TITLE_GAP - text_height as i64 / 2).max(0) as i32;
    draw_text_mut(
        canvas,
        SHADOW_COLOR,
        x + SHADOW_OFFSET,
        y + SHADOW_OFFSET,
        scale,
        font,
        title,
    );
    draw_text_mut(canvas, TEXT_COLOR, x, y, scale, font, title);
}

fn draw_banner(canvas: &mut RgbaImage, font: &FontVec, layout: &StoryLayout, art_bottom: i64) {
    let text = &layout.banner.text;
    if text.is_empty() {
        return;
    }

    let scale = PxScale::from(BANNER_FONT_SIZE);
    let (text_width, _) = text_size(scale, font, text);
    let x = aligned_x(
        layout.banner.alignment,
        canvas.width(),
        text_width,
        layout.artwork.padding,
    );
    let y = (art_bottom + BANNER_GAP).max(0) as i32;
    draw_text_mut(canvas, TEXT_COLOR, x, y, scale, font, text);
}

fn aligned_x(alignment: Alignment, canvas_width: u32, text_width: u32, padding: u32) -> i32 {
    match alignment {
        Alignment::Left => padding as i32,
        Alignment::Center => (canvas_width as i32 - text_width as i32) / 2,
        Alignment::Right => canvas_width as i32 - padding as i32 - text_width as i32,
    }
}

fn load_font(path: &Path) -> Result<FontVec, RenderError> {
    let bytes = std::fs::read(path).map_err(|_| RenderError::MissingFont(path.to_path_buf()))?;
    FontVec::try_from_vec(bytes)
        .map_err(|_| RenderError::Layout(format!("invalid font file {}", path.display())))
}

async fn fetch_asset(url: &str) -> Result<Vec<u8>, String> {
    let client = Client::new();
    let response = client.get(url).send().await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("{url} returned {status}", status = response.status()));
    }
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}
