use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the remote catalog client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credentials were rejected or the token exchange failed. Fatal, never
    /// retried.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The remote entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Network failure, 5xx or rate limiting. The caller decides whether to
    /// retry; the client never sleeps on these.
    #[error("transient api failure: {0}")]
    Transient(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transient(err.to_string())
    }
}

/// Failures raised by the local catalog store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database failure: {0}")]
    Engine(#[from] rusqlite::Error),

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    /// An album upsert referenced an artist that is not persisted.
    #[error("album {album_id} references unknown artist {artist_id}")]
    MissingArtist { album_id: String, artist_id: String },

    /// A track upsert referenced an album that is not persisted.
    #[error("track {track_id} references unknown album {album_id}")]
    MissingAlbum { track_id: String, album_id: String },
}

/// Failures raised by the story renderer. Fatal for the single render only;
/// previously persisted data is unaffected.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot fetch artwork: {0}")]
    Artwork(String),

    #[error("cannot fetch scan code: {0}")]
    Code(String),

    #[error("font file not found: {0}")]
    MissingFont(PathBuf),

    #[error("invalid layout: {0}")]
    Layout(String),

    #[error("track not in catalog: {0}")]
    UnknownTrack(String),

    #[error("image failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a whole sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
