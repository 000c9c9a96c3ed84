//! FIP to Tidal playlist synchronization library
//!
//! This library copies the track history aired on a FIP radio station into
//! Tidal playlists. It includes modules for pulling the station history page
//! by page, resolving tracks on Tidal, and populating playlists one track at
//! a time, plus the configuration and credentials plumbing around them.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by the extractor and the synchronizer
//! - `fip` - FIP history API client (the extractor)
//! - `management` - Credentials loading
//! - `tidal` - Tidal API client (the synchronizer)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Logging
//!
//! User-facing progress goes through the colored console macros below.
//! Request details are emitted with `log::debug!` and only show up when the
//! binary installs a logger at debug level (`--verbose`).
//!
//! # Example
//!
//! ```
//! use radiosync::{config, fip::HistoryClient};
//!
//! #[tokio::main]
//! async fn main() -> radiosync::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     let tracks = HistoryClient::new(settings.source).fetch_history(1592890417, 150).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fip;
pub mod management;
pub mod tidal;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the command-line seam where errors from the extractor, the
/// synchronizer and the configuration layer meet. The library components
/// themselves return [`error::SyncError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching {} tracks...", count);
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
/// # Example
///
/// ```
/// success!("Added {} tracks to playlist {}", added, uuid);
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
/// This macro terminates the process with exit code 1 after printing. It is
/// only meant for the binary; library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// // Program exits here - code after this will not execute
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
/// Used for recoverable issues, e.g. a track that has no match on Tidal or an
/// account whose synchronization failed while others continue.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
