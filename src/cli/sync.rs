use crate::{config, error, spotify::Session, store::CatalogStore, success, warning};

pub async fn run_sync(artist: Option<String>, verbose: bool) {
    let artist_id = artist.unwrap_or_else(config::artist_id);

    let store = match CatalogStore::open(config::db_path()) {
        Ok(store) => store,
        Err(e) => error!("Cannot open catalog store: {}", e),
    };

    let mut session = Session::new();

    match crate::sync::run(&mut session, &store, &artist_id, verbose).await {
        Ok(summary) => {
            for name in &summary.skipped_albums {
                warning!("Skipped album: {}", name);
            }
            success!(
                "Sync complete: {albums} albums processed, {tracks} tracks saved, {skipped} skipped",
                albums = summary.albums_processed,
                tracks = summary.tracks_saved,
                skipped = summary.skipped_albums.len()
            );
        }
        Err(e) => error!("Sync failed: {}", e),
    }
}
