use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{
    error::StorageError,
    store::schema,
    types::{Album, Artist, Track},
};

/// SQLite-backed catalog of the tracked artist's discography.
///
/// Single-process, single-connection access; per-statement atomicity only.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Opens (or creates) the catalog at the given path and runs the
    /// idempotent schema init.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let path = db_path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Opens an in-memory catalog (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn init_schema(&self) -> Result<(), StorageError> {
        schema::initialize(&self.conn)
    }

    /// Drops and recreates all tables inside the same database file.
    pub fn recreate(&self) -> Result<(), StorageError> {
        schema::drop_all(&self.conn)?;
        schema::initialize(&self.conn)
    }

    // ── Writes ───────────────────────────────────────────────────────

    pub fn upsert_artist(&self, artist: &Artist) -> Result<Artist, StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO artists (
                artist_id, name, spotify_url, spotify_uri,
                image_large_uri, image_medium_uri, image_thumb_uri
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                artist.id,
                artist.name,
                artist.spotify_url,
                artist.spotify_uri,
                artist.image_large_uri,
                artist.image_medium_uri,
                artist.image_thumb_uri,
            ],
        )?;
        Ok(artist.clone())
    }

    pub fn upsert_album(&self, album: &Album) -> Result<Album, StorageError> {
        if !self.exists("SELECT 1 FROM artists WHERE artist_id = ?1", &album.artist_id)? {
            return Err(StorageError::MissingArtist {
                album_id: album.id.clone(),
                artist_id: album.artist_id.clone(),
            });
        }

        self.conn.execute(
            "INSERT OR REPLACE INTO albums (
                album_id, artist_id, name, release_date, track_count,
                album_type, spotify_url, spotify_uri, qr_code_url,
                image_large_uri, image_medium_uri, image_thumb_uri
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                album.id,
                album.artist_id,
                album.name,
                album.release_date,
                album.track_count,
                album.album_type,
                album.spotify_url,
                album.spotify_uri,
                album.qr_code_url,
                album.image_large_uri,
                album.image_medium_uri,
                album.image_thumb_uri,
            ],
        )?;
        Ok(album.clone())
    }

    pub fn upsert_track(&self, track: &Track) -> Result<Track, StorageError> {
        if !self.exists("SELECT 1 FROM albums WHERE album_id = ?1", &track.album_id)? {
            return Err(StorageError::MissingAlbum {
                track_id: track.id.clone(),
                album_id: track.album_id.clone(),
            });
        }

        self.conn.execute(
            "INSERT OR REPLACE INTO tracks (
                track_id, album_id, name, track_number, duration_ms,
                duration, spotify_url, spotify_uri, qr_code_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                track.id,
                track.album_id,
                track.name,
                track.track_number,
                track.duration_ms,
                track.duration,
                track.spotify_url,
                track.spotify_uri,
                track.qr_code_url,
            ],
        )?;
        Ok(track.clone())
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn get_artist(&self, artist_id: &str) -> Result<Option<Artist>, StorageError> {
        let artist = self
            .conn
            .query_row(
                "SELECT artist_id, name, spotify_url, spotify_uri,
                        image_large_uri, image_medium_uri, image_thumb_uri
                 FROM artists WHERE artist_id = ?1",
                params![artist_id],
                row_to_artist,
            )
            .optional()?;
        Ok(artist)
    }

    pub fn list_artists(&self) -> Result<Vec<Artist>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT artist_id, name, spotify_url, spotify_uri,
                    image_large_uri, image_medium_uri, image_thumb_uri
             FROM artists ORDER BY name ASC",
        )?;
        let artists = stmt
            .query_map([], row_to_artist)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    /// Lists albums newest first, optionally restricted to one artist.
    pub fn list_albums(&self, artist_id: Option<&str>) -> Result<Vec<Album>, StorageError> {
        let base = "SELECT album_id, artist_id, name, release_date, track_count,
                           album_type, spotify_url, spotify_uri, qr_code_url,
                           image_large_uri, image_medium_uri, image_thumb_uri
                    FROM albums";

        let albums = match artist_id {
            Some(artist_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{base} WHERE artist_id = ?1 ORDER BY release_date DESC, name ASC"
                ))?;
                let rows = stmt.query_map(params![artist_id], row_to_album)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{base} ORDER BY release_date DESC, name ASC"))?;
                let rows = stmt.query_map([], row_to_album)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(albums)
    }

    /// Lists an album's tracks by ascending track number.
    pub fn list_tracks_for_album(&self, album_id: &str) -> Result<Vec<Track>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT track_id, album_id, name, track_number, duration_ms,
                    duration, spotify_url, spotify_uri, qr_code_url
             FROM tracks WHERE album_id = ?1 ORDER BY track_number ASC",
        )?;
        let tracks = stmt
            .query_map(params![album_id], row_to_track)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tracks)
    }

    /// Case-insensitive track lookup by title, joined with the parent album
    /// (the story renderer needs the album for artwork and context).
    pub fn find_track_by_title(
        &self,
        title: &str,
    ) -> Result<Option<(Track, Album)>, StorageError> {
        let found = self
            .conn
            .query_row(
                "SELECT t.track_id, t.album_id, t.name, t.track_number, t.duration_ms,
                        t.duration, t.spotify_url, t.spotify_uri, t.qr_code_url,
                        a.album_id, a.artist_id, a.name, a.release_date, a.track_count,
                        a.album_type, a.spotify_url, a.spotify_uri, a.qr_code_url,
                        a.image_large_uri, a.image_medium_uri, a.image_thumb_uri
                 FROM tracks t
                 JOIN albums a ON t.album_id = a.album_id
                 WHERE LOWER(t.name) = LOWER(?1)",
                params![title],
                |row| {
                    let track = Track {
                        id: row.get(0)?,
                        album_id: row.get(1)?,
                        name: row.get(2)?,
                        track_number: row.get(3)?,
                        duration_ms: row.get(4)?,
                        duration: row.get(5)?,
                        spotify_url: row.get(6)?,
                        spotify_uri: row.get(7)?,
                        qr_code_url: row.get(8)?,
                    };
                    let album = Album {
                        id: row.get(9)?,
                        artist_id: row.get(10)?,
                        name: row.get(11)?,
                        release_date: row.get(12)?,
                        track_count: row.get(13)?,
                        album_type: row.get(14)?,
                        spotify_url: row.get(15)?,
                        spotify_uri: row.get(16)?,
                        qr_code_url: row.get(17)?,
                        image_large_uri: row.get(18)?,
                        image_medium_uri: row.get(19)?,
                        image_thumb_uri: row.get(20)?,
                    };
                    Ok((track, album))
                },
            )
            .optional()?;
        Ok(found)
    }

    pub fn count_albums(&self) -> Result<u64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM albums", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn count_tracks(&self) -> Result<u64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn exists(&self, sql: &str, id: &str) -> Result<bool, StorageError> {
        let hit: Option<i64> = self
            .conn
            .query_row(sql, params![id], |row| row.get(0))
            .optional()?;
        Ok(hit.is_some())
    }
}

fn row_to_artist(row: &Row) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        spotify_url: row.get(2)?,
        spotify_uri: row.get(3)?,
        image_large_uri: row.get(4)?,
        image_medium_uri: row.get(5)?,
        image_thumb_uri: row.get(6)?,
    })
}

fn row_to_album(row: &Row) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get(0)?,
        artist_id: row.get(1)?,
        name: row.get(2)?,
        release_date: row.get(3)?,
        track_count: row.get(4)?,
        album_type: row.get(5)?,
        spotify_url: row.get(6)?,
        spotify_uri: row.get(7)?,
        qr_code_url: row.get(8)?,
        image_large_uri: row.get(9)?,
        image_medium_uri: row.get(10)?,
        image_thumb_uri: row.get(11)?,
    })
}

fn row_to_track(row: &Row) -> rusqlite::Result<Track> {
    Ok(Track {
        id: row.get(0)?,
        album_id: row.get(1)?,
        name: row.get(2)?,
        track_number: row.get(3)?,
        duration_ms: row.get(4)?,
        duration: row.get(5)?,
        spotify_url: row.get(6)?,
        spotify_uri: row.get(7)?,
        qr_code_url: row.get(8)?,
    })
}
