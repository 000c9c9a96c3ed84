use log::debug;
use reqwest::StatusCode;

use crate::{
    error::SyncError,
    tidal::TidalClient,
    types::PlaylistResponse,
};

/// A Tidal playlist together with the `lastUpdated` value its next mutation
/// must present in `If-None-Match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistHandle {
    pub uuid: String,
    /// Milliseconds since the Unix epoch.
    pub last_updated: i64,
}

/// Where a single track id stands in the append loop.
///
/// `Pending -> TokenRefreshed -> Appended`. A failure is terminal and is
/// reported through `SyncError::PartialAppend` with the last state reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendState {
    Pending,
    TokenRefreshed,
    Appended,
}

impl TidalClient {
    /// Creates an empty playlist owned by the logged-in account.
    pub async fn create_empty_playlist(
        &self,
        title: &str,
        description: &str,
    ) -> Result<PlaylistHandle, SyncError> {
        let user_id = self.require_session()?.user_id;
        let request = self
            .post(&format!("/users/{user_id}/playlists"))
            .form(&[("title", title), ("description", description)]);

        let playlist: PlaylistResponse = self.send(request).await?;
        debug!(
            "Created playlist {} ({:?}), last updated {}",
            playlist.uuid, playlist.title, playlist.last_updated
        );

        Ok(PlaylistHandle {
            uuid: playlist.uuid,
            last_updated: playlist.last_updated,
        })
    }

    /// Reads the playlist's current `lastUpdated`, in epoch milliseconds.
    pub async fn last_updated(&self, uuid: &str) -> Result<i64, SyncError> {
        let playlist: PlaylistResponse = self.send(self.get(&format!("/playlists/{uuid}"))).await?;
        Ok(playlist.last_updated)
    }

    /// Re-reads the concurrency token of `handle` in place.
    pub async fn refresh_handle(&self, handle: &mut PlaylistHandle) -> Result<(), SyncError> {
        handle.last_updated = self.last_updated(&handle.uuid).await?;
        Ok(())
    }

    /// Appends one track under the handle's current `lastUpdated`.
    ///
    /// Tidal is told to fail on duplicates and on unknown tracks rather than
    /// skip them. A rejected precondition (HTTP 412) comes back as
    /// `SyncError::PreconditionFailed`.
    pub async fn append_track(
        &self,
        handle: &PlaylistHandle,
        track_id: u64,
    ) -> Result<(), SyncError> {
        let request = self
            .post(&format!("/playlists/{}/items", handle.uuid))
            .header("If-None-Match", handle.last_updated.to_string())
            .form(&[
                ("onArtifactNotFound", "FAIL".to_string()),
                ("onDupes", "FAIL".to_string()),
                ("trackIds", track_id.to_string()),
            ]);

        match self.execute(request).await {
            Ok(_) => Ok(()),
            Err(SyncError::Protocol { status, .. }) if status == StatusCode::PRECONDITION_FAILED => {
                Err(SyncError::PreconditionFailed {
                    playlist: handle.uuid.clone(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Appends `track_ids` one by one, in order, and returns how many were
    /// added.
    ///
    /// Tidal invalidates `lastUpdated` after every successful mutation, so it
    /// is re-read right before each append. `on_appended` is called with the
    /// running count after each success.
    ///
    /// # Errors
    ///
    /// The first failure stops the loop; later ids are not attempted. The
    /// error is wrapped in `SyncError::PartialAppend` with the number of
    /// tracks already in the playlist, which are left there, and the failing
    /// id with the state it had reached.
    pub async fn populate_playlist<F>(
        &self,
        handle: &mut PlaylistHandle,
        track_ids: &[u64],
        mut on_appended: F,
    ) -> Result<usize, SyncError>
    where
        F: FnMut(usize),
    {
        let mut added = 0;

        for (i, track_id) in track_ids.iter().enumerate() {
            let mut state = AppendState::Pending;
            if let Err(e) = self.append_step(handle, *track_id, &mut state).await {
                return Err(SyncError::PartialAppend {
                    added,
                    track_id: *track_id,
                    reached: state,
                    source: Box::new(e),
                });
            }
            debug!("Track {} ({}/{}) appended", track_id, i + 1, track_ids.len());

            added += 1;
            on_appended(added);
        }

        Ok(added)
    }

    async fn append_step(
        &self,
        handle: &mut PlaylistHandle,
        track_id: u64,
        state: &mut AppendState,
    ) -> Result<(), SyncError> {
        self.refresh_handle(handle).await?;
        *state = AppendState::TokenRefreshed;
        self.append_track(handle, track_id).await?;
        *state = AppendState::Appended;
        Ok(())
    }
}
