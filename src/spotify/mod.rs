//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the
//! discography tracker. It implements authentication, artist lookup and the
//! paginated album and track listings, handling all HTTP communication and
//! error mapping between Spotify's services and the rest of the application.
//!
//! ## Architecture
//!
//! The module follows a feature-based organization where each submodule
//! handles a specific domain of Spotify API functionality:
//!
//! ```text
//! Application Layer (CLI, Sync Orchestrator)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 client credentials)
//!     ├── Artist Lookup (metadata, imagery)
//!     └── Catalog Listings (albums, tracks, pagination)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - The [`auth::Session`] object owning the cached bearer token
//!   and the client-credentials exchange. The session is passed `&mut` into
//!   every API call; there is no ambient token state.
//! - [`artist`] - Single-artist metadata lookup.
//! - [`albums`] - Paginated album and track listings with duplicate removal.
//!
//! ## Authentication Strategy
//!
//! The module uses the OAuth 2.0 client-credentials grant: the configured
//! client id and secret are exchanged for a short-lived bearer token which is
//! cached in memory for the process lifetime. Tokens are refreshed shortly
//! before their reported expiry, and a 401 from any data endpoint triggers
//! exactly one re-authentication attempt before the failure is surfaced.
//!
//! ## Error Handling Philosophy
//!
//! Every function maps HTTP outcomes onto the [`crate::error::ApiError`]
//! taxonomy:
//!
//! - **Auth**: rejected credentials or a non-2xx token exchange. Fatal.
//! - **NotFound**: the requested entity does not exist remotely.
//! - **Transient**: network failures, 5xx responses and 429 rate limits.
//!   The `Retry-After` hint is surfaced in the error message, but the client
//!   itself never sleeps or retries; whether to back off is the caller's
//!   decision.
//!
//! ## API Coverage
//!
//! - `POST <token endpoint>` - client-credentials token exchange
//! - `GET /artists/{id}` - artist metadata
//! - `GET /artists/{id}/albums` - album listing, offset/limit pagination
//! - `GET /albums/{id}/tracks` - track listing, offset/limit pagination
//!
//! ## Side Effects
//!
//! Network calls only. Nothing in this module mutates local state; persisting
//! fetched records is the orchestrator's job.

pub mod albums;
pub mod artist;
pub mod auth;

pub use albums::fetch_album_tracks;
pub use albums::fetch_all_albums;
pub use artist::fetch_artist;
pub use auth::Session;

use reqwest::{Response, StatusCode};

use crate::error::ApiError;

/// Maps a non-success data-endpoint response onto `ApiError::Transient`,
/// surfacing the Retry-After hint for rate-limited responses.
pub(crate) fn transient_from_response(context: &str, response: &Response) -> ApiError {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("unknown");
        return ApiError::Transient(format!(
            "{context}: rate limited, retry-after {retry_after}s"
        ));
    }
    ApiError::Transient(format!("{context}: status {status}"))
}
