//! Artist Discography Tracker Library
//!
//! This library provides functionality for tracking a single artist's
//! discography on Spotify. It fetches the remote catalog through the Spotify
//! Web API, persists it into a local SQLite catalog, and renders shareable
//! output from the persisted data: a static discography HTML page and
//! per-track story images for social media.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed error taxonomy shared by all components
//! - `render` - Discography HTML and story image renderers
//! - `spotify` - Spotify Web API client implementation
//! - `store` - Local SQLite catalog store
//! - `sync` - Synchronization pipeline from remote catalog to local store
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use discotrack::{config, spotify, store, sync};
//!
//! #[tokio::main]
//! async fn main() -> discotrack::Res<()> {
//!     config::load_env().await?;
//!     let mut session = spotify::Session::new();
//!     let catalog = store::CatalogStore::open(&config::db_path())?;
//!     let summary = sync::run(&mut session, &catalog, &config::artist_id(), false).await?;
//!     println!("{} albums, {} tracks", summary.albums_processed, summary.tracks_saved);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod spotify;
pub mod store;
pub mod sync;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern at the CLI boundary using a
/// boxed dynamic error trait object. Component-level code returns the typed
/// errors from [`error`]; this alias is for the outer layers where all of
/// them converge.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use discotrack::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a blue "o" indicator followed by the
/// provided message. Used for general information and status updates
/// throughout the application.
///
/// # Example
///
/// ```
/// info!("Fetching artist albums...");
/// info!("Saved {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Database initialized");
/// success!("Synchronized {} albums", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used at the CLI boundary for
/// unrecoverable failures; the message should name the failing stage.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing the
/// error message. Code after it will not execute.
///
/// # Example
///
/// ```
/// error!("Sync failed: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// recoverable issues, such as an album skipped during a sync run.
///
/// # Example
///
/// ```
/// warning!("Skipping album {}: {}", name, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
