use std::path::PathBuf;

use crate::{config, error, render, store::CatalogStore, success};

pub async fn discography(output: Option<PathBuf>) {
    let store = match CatalogStore::open(config::db_path()) {
        Ok(store) => store,
        Err(e) => error!("Cannot open catalog store: {}", e),
    };

    let output_path = output.unwrap_or_else(|| PathBuf::from("discography.html"));

    match render::discography::render(&store, &output_path).await {
        Ok(path) => success!("Generated discography at {}", path.display()),
        Err(e) => error!("Discography render failed: {}", e),
    }
}
