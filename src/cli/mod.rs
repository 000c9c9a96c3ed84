//! # CLI Module
//!
//! User-facing commands of radiosync. Each command resolves its inputs,
//! drives the library components and reports progress on the console.
//!
//! ## Commands
//!
//! - [`history`] - Prints the tracks aired on the station as a table
//! - [`sync`] - Copies the aired tracks into a playlist on every Tidal account
//!
//! ## Layers
//!
//! ```text
//! CLI Layer (arguments, progress, reporting)
//!     ↓
//! fip (history extraction)     tidal (search, playlist, append)
//!     ↓                            ↓
//! FIP GraphQL API              Tidal API
//! ```
//!
//! ## Usage
//!
//! ```bash
//! radiosync history --count 20                       # what played in the last 24h
//! radiosync sync --from 2020-06-23 --count 250       # 250 tracks from midnight UTC
//! radiosync sync --name "FIP mornings" --verbose     # custom title, request details
//! ```

mod history;
mod sync;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use history::history;
pub use sync::sync;

/// Blue braille spinner used while waiting on the network.
fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
