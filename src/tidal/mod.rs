//! # Tidal synchronization
//!
//! A small client for the Tidal API as used by Tidal's web player, and the
//! routine that turns a FIP track list into a Tidal playlist.
//!
//! ## Flow per run
//!
//! ```text
//! tokens manifest ──> api token (once per run)
//!                        │
//!        for each account│
//!                        ▼
//!   login ─> search every track ─> dedup ids ─> create playlist
//!                                                   │
//!                     ┌─────────────────────────────┘
//!                     ▼
//!          for each id: GET lastUpdated ─> POST item (If-None-Match)
//! ```
//!
//! ## Concurrency token
//!
//! Tidal guards playlist mutations with an `If-None-Match` header holding
//! the playlist's `lastUpdated` time in epoch milliseconds. Each successful
//! append changes that value, so it is fetched again before every append.
//! Appends are one track per request.
//!
//! ## Failure policy
//!
//! - The manifest or any request during login, search or playlist creation
//!   failing aborts the account.
//! - A track with no search result is skipped, not an error.
//! - An append failure stops the loop and keeps what was already added.
//! - Accounts are independent: one failing does not stop the next.
//! - Nothing is retried.

pub mod auth;
pub mod client;
pub mod playlist;
pub mod search;

pub use client::TidalClient;
pub use playlist::{AppendState, PlaylistHandle};
pub use search::ResolvedTrackId;

use crate::{
    config::DestinationConfig,
    error::SyncError,
    info,
    types::{Account, Track},
    utils, warning,
};

/// What one account's synchronization achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub playlist_uuid: String,
    pub searched: usize,
    pub not_found: usize,
    pub unique: usize,
    pub added: usize,
}

/// Result of synchronizing one account.
#[derive(Debug)]
pub struct AccountOutcome {
    pub username: String,
    pub result: Result<SyncReport, SyncError>,
}

impl AccountOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Reproduces `tracks` as a new playlist named `playlist_name` on one
/// account.
///
/// Logs in, resolves every track, deduplicates the resolved ids, creates an
/// empty playlist and appends the ids one at a time. `on_appended` receives
/// the running count of added tracks.
///
/// # Errors
///
/// - login, search or creation failures abort before anything is appended
/// - an append failure is returned as `SyncError::PartialAppend`
pub async fn sync_to_destination<F>(
    config: &DestinationConfig,
    api_token: &str,
    account: &Account,
    playlist_name: &str,
    tracks: &[Track],
    on_appended: F,
) -> Result<SyncReport, SyncError>
where
    F: FnMut(usize),
{
    let mut client = TidalClient::new(config.clone(), api_token);

    let session = client.login(account).await?;
    info!(
        "Logged in as {} (user {}, {})",
        account.username, session.user_id, session.country_code
    );

    let resolved = client.resolve_tracks(tracks).await?;
    let not_found = resolved
        .iter()
        .filter(|id| **id == ResolvedTrackId::NotFound)
        .count();
    let track_ids = utils::unique_track_ids(&resolved);
    info!(
        "Matched {}/{} tracks, {} unique",
        tracks.len() - not_found,
        tracks.len(),
        track_ids.len()
    );

    let mut handle = client.create_empty_playlist(playlist_name, "").await?;
    info!("Created playlist {:?} ({})", playlist_name, handle.uuid);

    let added = client
        .populate_playlist(&mut handle, &track_ids, on_appended)
        .await?;

    Ok(SyncReport {
        playlist_uuid: handle.uuid,
        searched: tracks.len(),
        not_found,
        unique: track_ids.len(),
        added,
    })
}

/// Runs [`sync_to_destination`] for every account, one after the other.
///
/// The API token is fetched once up front; failing to get it aborts the
/// run. Per-account failures are collected in the returned outcomes.
pub async fn sync_accounts<F>(
    config: &DestinationConfig,
    accounts: &[Account],
    playlist_name: &str,
    tracks: &[Track],
    mut on_appended: F,
) -> Result<Vec<AccountOutcome>, SyncError>
where
    F: FnMut(&Account, usize),
{
    let api_token = auth::fetch_api_token(&config.token_manifest_url).await?;
    let mut outcomes = Vec::with_capacity(accounts.len());

    for (i, account) in accounts.iter().enumerate() {
        info!(
            "Processing account {} ({}/{})",
            account.username,
            i + 1,
            accounts.len()
        );

        let result = sync_to_destination(
            config,
            &api_token,
            account,
            playlist_name,
            tracks,
            |added| on_appended(account, added),
        )
        .await;

        if let Err(e) = &result {
            warning!("Synchronization failed for {}: {}", account.username, e);
        }

        outcomes.push(AccountOutcome {
            username: account.username.clone(),
            result,
        });
    }

    Ok(outcomes)
}
