use rusqlite::Connection;

use crate::error::StorageError;

const ARTISTS_DDL: &str = "CREATE TABLE IF NOT EXISTS artists (
    artist_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    spotify_url TEXT NOT NULL,
    spotify_uri TEXT NOT NULL,
    image_large_uri TEXT NOT NULL,
    image_medium_uri TEXT NOT NULL,
    image_thumb_uri TEXT NOT NULL
)";

const ALBUMS_DDL: &str = "CREATE TABLE IF NOT EXISTS albums (
    album_id TEXT PRIMARY KEY,
    artist_id TEXT NOT NULL,
    name TEXT NOT NULL,
    release_date TEXT NOT NULL,
    track_count INTEGER NOT NULL,
    album_type TEXT NOT NULL,
    spotify_url TEXT NOT NULL,
    spotify_uri TEXT NOT NULL,
    qr_code_url TEXT NOT NULL,
    image_large_uri TEXT NOT NULL,
    image_medium_uri TEXT NOT NULL,
    image_thumb_uri TEXT NOT NULL,
    FOREIGN KEY (artist_id) REFERENCES artists(artist_id)
)";

const TRACKS_DDL: &str = "CREATE TABLE IF NOT EXISTS tracks (
    track_id TEXT PRIMARY KEY,
    album_id TEXT NOT NULL,
    name TEXT NOT NULL,
    track_number INTEGER NOT NULL,
    duration_ms INTEGER NOT NULL,
    duration TEXT NOT NULL,
    spotify_url TEXT NOT NULL,
    spotify_uri TEXT NOT NULL,
    qr_code_url TEXT NOT NULL,
    FOREIGN KEY (album_id) REFERENCES albums(album_id)
)";

const INDICES_DDL: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_albums_artist ON albums(artist_id)",
    "CREATE INDEX IF NOT EXISTS idx_tracks_album ON tracks(album_id)",
];

/// Creates the three catalog tables and their indices. Idempotent.
pub fn initialize(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(ARTISTS_DDL, [])?;
    conn.execute(ALBUMS_DDL, [])?;
    conn.execute(TRACKS_DDL, [])?;
    for ddl in INDICES_DDL {
        conn.execute(ddl, [])?;
    }
    Ok(())
}

/// Drops all catalog tables. Children first, so the declared foreign keys
/// stay satisfiable if enforcement is ever switched on.
pub fn drop_all(conn: &Connection) -> Result<(), StorageError> {
    conn.execute("DROP TABLE IF EXISTS tracks", [])?;
    conn.execute("DROP TABLE IF EXISTS albums", [])?;
    conn.execute("DROP TABLE IF EXISTS artists", [])?;
    Ok(())
}
