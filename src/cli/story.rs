use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error,
    error::RenderError,
    render::{self, StoryLayout},
    store::CatalogStore,
    success,
};

pub async fn story(title: String, layout: Option<PathBuf>, output_dir: Option<PathBuf>) {
    let store = match CatalogStore::open(config::db_path()) {
        Ok(store) => store,
        Err(e) => error!("Cannot open catalog store: {}", e),
    };

    let layout = match layout {
        Some(path) => match StoryLayout::load(&path) {
            Ok(layout) => layout,
            Err(e) => error!("Invalid story layout: {}", e),
        },
        None => StoryLayout::default(),
    };

    let found = match store.find_track_by_title(&title) {
        Ok(found) => found,
        Err(e) => error!("Catalog lookup failed: {}", e),
    };
    let (track, album) = match found {
        Some(pair) => pair,
        None => error!(
            "Story render failed: {}. Run discotrack sync first.",
            RenderError::UnknownTrack(title)
        ),
    };

    let output_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Composing story for {name}...", name = track.name));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = render::render_story(&track, &album, &layout, &output_dir).await;
    pb.finish_and_clear();

    match result {
        Ok(path) => success!("Created story at {}", path.display()),
        Err(e) => error!("Story render failed: {}", e),
    }
}
