//! Synchronization pipeline: remote catalog → local catalog store.

use crate::{
    error::{ApiError, SyncError},
    info,
    spotify::{self, Session},
    store::CatalogStore,
    types::Album,
    warning,
};

/// Outcome of one sync run.
#[derive(Debug, Default)]
pub struct SyncSummary {
    /// Albums whose tracks were fully persisted.
    pub albums_processed: usize,
    /// Tracks persisted across all albums.
    pub tracks_saved: usize,
    /// Names of albums skipped after a track-fetch failure.
    pub skipped_albums: Vec<String>,
}

/// Runs one sync: authenticate, fetch the artist, then walk the album
/// listing upserting every album and its tracks.
///
/// Failure policy (deliberate, per-album): a not-found or transient failure
/// while fetching one album's tracks aborts that album's sub-loop with a
/// warning and the run continues with the next album. Authentication and
/// storage failures abort the whole run immediately. Re-running against an
/// unchanged remote performs only overwrite-upserts and leaves row counts
/// unchanged.
pub async fn run(
    session: &mut Session,
    store: &CatalogStore,
    artist_id: &str,
    verbose: bool,
) -> Result<SyncSummary, SyncError> {
    let artist = spotify::fetch_artist(session, artist_id).await?;
    store.upsert_artist(&artist)?;
    info!("Tracking artist {}", artist.name);

    let albums = spotify::fetch_all_albums(session, artist_id).await?;
    info!("Processing {} albums...", albums.len());

    let mut summary = SyncSummary::default();
    let albums_total = albums.len();

    for (index, album) in albums.iter().enumerate() {
        store.upsert_album(album)?;
        if verbose {
            dump_record(album);
        }

        let tracks = match spotify::fetch_album_tracks(session, &album.id).await {
            Ok(tracks) => tracks,
            Err(err @ ApiError::Auth(_)) => return Err(err.into()),
            Err(err) => {
                warning!("Skipping album {name}: {err}", name = album.name);
                summary.skipped_albums.push(album.name.clone());
                continue;
            }
        };

        for track in &tracks {
            store.upsert_track(track)?;
            if verbose {
                info!("  - Saved track {nr}. {name}", nr = track.track_number, name = track.name);
            }
        }

        summary.albums_processed += 1;
        summary.tracks_saved += tracks.len();
        info!(
            "[{current}/{total}] Saved album {name} ({tracks} tracks)",
            current = index + 1,
            total = albums_total,
            name = album.name,
            tracks = tracks.len()
        );
    }

    Ok(summary)
}

fn dump_record(album: &Album) {
    match serde_json::to_string_pretty(album) {
        Ok(json) => info!("Album record:\n{}", json),
        Err(e) => warning!("Cannot serialize album {name}: {e}", name = album.name),
    }
}
