//! # CLI Module
//!
//! User-facing command implementations for the discography tracker. Each
//! function backs one subcommand, coordinates the underlying components
//! (store, Spotify client, sync pipeline, renderers) and reports through
//! the colored output macros; unrecoverable failures terminate with a
//! non-zero exit code and a message naming the failing stage.
//!
//! ## Commands
//!
//! - [`init_db`] / [`recreate_db`] - catalog database lifecycle
//! - [`run_sync`] - one synchronization run from the remote catalog
//! - [`list`] - tabular dump of the cached catalog
//! - [`discography`] - static HTML discography page
//! - [`story`] - story image for a single track

mod db;
mod discography;
mod list;
mod story;
mod sync;

pub use db::init_db;
pub use db::recreate_db;
pub use discography::discography;
pub use list::list;
pub use story::story;
pub use sync::run_sync;
