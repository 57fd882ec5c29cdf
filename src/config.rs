//! Configuration management for the discography tracker.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, the
//! tracked artist, API endpoints and the local catalog database path.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `discotrack/.env`. This allows users to store
/// credentials securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/discotrack/.env`
/// - macOS: `~/Library/Application Support/discotrack/.env`
/// - Windows: `%LOCALAPPDATA%/discotrack/.env`
///
/// Missing files are not an error: configuration may come entirely from the
/// process environment.
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - An existing `.env` file cannot be read or parsed
///
/// # Example
///
/// ```
/// use discotrack::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("discotrack/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_CLIENT_ID` environment variable which contains the
/// client ID obtained when registering the application with Spotify's
/// developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// Retrieves the `SPOTIFY_CLIENT_SECRET` environment variable which contains
/// the client secret obtained when registering the application. Used for the
/// client-credentials token exchange.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_SECRET` environment variable is not set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set")
}

/// Returns the Spotify ID of the tracked artist.
///
/// Retrieves the `SPOTIFY_ARTIST_ID` environment variable identifying the
/// artist whose discography is synchronized. The `sync --artist` flag
/// overrides this value for a single run.
///
/// # Panics
///
/// Panics if the `SPOTIFY_ARTIST_ID` environment variable is not set.
pub fn artist_id() -> String {
    env::var("SPOTIFY_ARTIST_ID").expect("SPOTIFY_ARTIST_ID must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable, falling back to the
/// production endpoint. The override exists so that the client can be pointed
/// at a local test double.
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Spotify OAuth token endpoint URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable, falling back
/// to the production accounts endpoint. Used for the client-credentials
/// grant.
///
/// # Example
///
/// ```
/// let token_url = spotify_apitoken_url(); // "https://accounts.spotify.com/api/token"
/// ```
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the path of the local catalog database file.
///
/// Retrieves the `DISCOTRACK_DB_PATH` environment variable, falling back to
/// `discotrack/catalog.db` under the platform-specific local data directory.
pub fn db_path() -> PathBuf {
    match env::var("DISCOTRACK_DB_PATH") {
        Ok(path) => PathBuf::from(path),
        Err(_) => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("discotrack/catalog.db");
            path
        }
    }
}
