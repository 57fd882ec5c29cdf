use tabled::Table;

use crate::{
    config, error, info,
    store::CatalogStore,
    types::{AlbumTableRow, TrackTableRow},
};

pub async fn list() {
    let store = match CatalogStore::open(config::db_path()) {
        Ok(store) => store,
        Err(e) => error!("Cannot open catalog store: {}", e),
    };

    let albums = match store.list_albums(None) {
        Ok(albums) => albums,
        Err(e) => error!("Cannot list albums: {}", e),
    };

    if albums.is_empty() {
        info!("No releases in catalog. Run discotrack sync first.");
        return;
    }

    let album_rows: Vec<AlbumTableRow> = albums
        .iter()
        .map(|album| AlbumTableRow {
            released: album.release_date.clone(),
            title: album.name.clone(),
            kind: album.album_type.clone(),
            tracks: album.track_count.to_string(),
        })
        .collect();
    println!("{table}\n", table = Table::new(album_rows));

    let mut track_rows: Vec<TrackTableRow> = Vec::new();
    for album in &albums {
        let tracks = match store.list_tracks_for_album(&album.id) {
            Ok(tracks) => tracks,
            Err(e) => error!("Cannot list tracks for album {}: {}", album.name, e),
        };
        for track in tracks {
            track_rows.push(TrackTableRow {
                album: album.name.clone(),
                nr: track.track_number.to_string(),
                title: track.name.clone(),
                duration: track.duration.clone(),
            });
        }
    }

    if !track_rows.is_empty() {
        println!("{table}", table = Table::new(track_rows));
    }
}
