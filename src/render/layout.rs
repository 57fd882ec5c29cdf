use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{error::RenderError, utils};

/// Story layout configuration.
///
/// Loaded from a TOML document; every option has an explicit default and
/// unknown keys are rejected so that typos fail loudly instead of silently
/// falling back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StoryLayout {
    pub image: ImageLayout,
    pub artwork: ArtworkLayout,
    pub title: TitleLayout,
    pub banner: BannerLayout,
    pub qr: QrLayout,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ImageLayout {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
}

impl Default for ImageLayout {
    fn default() -> Self {
        ImageLayout {
            width: 1080,
            height: 1300,
            background_color: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ArtworkLayout {
    pub padding: u32,
    pub vertical_offset: i32,
}

impl Default for ArtworkLayout {
    fn default() -> Self {
        ArtworkLayout {
            padding: 100,
            vertical_offset: -20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TitleLayout {
    /// Without a configured font the title and banner layers are skipped.
    pub font_file: Option<PathBuf>,
    pub font_size: f32,
    pub alignment: Alignment,
}

impl Default for TitleLayout {
    fn default() -> Self {
        TitleLayout {
            font_file: None,
            font_size: 120.0,
            alignment: Alignment::Center,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BannerLayout {
    pub text: String,
    pub alignment: Alignment,
}

impl Default for BannerLayout {
    fn default() -> Self {
        BannerLayout {
            text: "NOW STREAMING EVERYWHERE".to_string(),
            alignment: Alignment::Center,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct QrLayout {
    /// Width the downloaded scan code is scaled to.
    pub size: u32,
}

impl Default for QrLayout {
    fn default() -> Self {
        QrLayout { size: 560 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl StoryLayout {
    /// Reads and validates a layout file.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let raw = std::fs::read_to_string(path)?;
        let layout: StoryLayout =
            toml::from_str(&raw).map_err(|e| RenderError::Layout(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.image.width == 0 || self.image.height == 0 {
            return Err(RenderError::Layout(
                "image width and height must be positive".to_string(),
            ));
        }
        if self.artwork.padding * 2 >= self.image.width {
            return Err(RenderError::Layout(
                "artwork padding leaves no room for the artwork".to_string(),
            ));
        }
        if self.title.font_size <= 0.0 {
            return Err(RenderError::Layout("font size must be positive".to_string()));
        }
        if self.qr.size == 0 {
            return Err(RenderError::Layout("qr size must be positive".to_string()));
        }
        utils::parse_hex_color(&self.image.background_color).map_err(RenderError::Layout)?;
        Ok(())
    }
}
