//! Error types shared by the FIP extractor and the Tidal synchronizer.

use reqwest::StatusCode;
use thiserror::Error;

use crate::tidal::AppendState;

/// Main error type for extraction and synchronization.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request never produced a response (connection, DNS, TLS...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status that is not a success.
    #[error("request failed with HTTP {status}: {body}")]
    Protocol { status: StatusCode, body: String },

    /// The response body, or a value inside it, could not be decoded.
    #[error("cannot decode response: {0}")]
    Decode(String),

    /// A history page came back without any track.
    #[error("empty history page at cursor {cursor:?}")]
    EmptyPage { cursor: String },

    /// Tidal rejected the `If-None-Match` precondition of a mutation.
    #[error("playlist {playlist} changed since its last update was read")]
    PreconditionFailed { playlist: String },

    /// The append loop stopped after `added` tracks were appended. `reached`
    /// is how far `track_id` got before failing.
    #[error("appending stopped after {added} track(s), track {track_id} failed at {reached:?}: {source}")]
    PartialAppend {
        added: usize,
        track_id: u64,
        reached: AppendState,
        #[source]
        source: Box<SyncError>,
    },

    /// An account-scoped call was made before logging in.
    #[error("not logged in to Tidal")]
    NotAuthenticated,

    /// The credentials file is missing or malformed.
    #[error("credentials error: {0}")]
    Credentials(String),
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}
