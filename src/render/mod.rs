//! # Rendering Module
//!
//! Turns the persisted catalog into shareable output. Two renderers live
//! here, both pure consumers of the local catalog store:
//!
//! - [`discography`] - emits one standalone HTML page listing every album
//!   and its tracks in store order (albums newest first, tracks by track
//!   number). Plain string composition, no templating engine, no scripts;
//!   an empty store still renders a valid document.
//! - [`story`] - composes one vertical raster image for a single track:
//!   background fill, dimmed album artwork, title text, streaming banner
//!   and the track's scan code, governed by the [`layout::StoryLayout`]
//!   configuration loaded from a TOML file.
//!
//! Layer order for stories, back to front: background → artwork → title →
//! banner → scan code. Asset downloads (artwork, scan code) are the only
//! network access in this module and failures surface as
//! [`crate::error::RenderError`] without retries; a failed render never
//! touches previously persisted data.

pub mod discography;
pub mod layout;
pub mod story;

pub use layout::StoryLayout;
pub use story::render_story;
