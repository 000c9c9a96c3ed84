use log::debug;

use crate::{
    error::SyncError,
    tidal::TidalClient,
    types::{SearchResponse, Track},
    warning,
};

/// Outcome of looking a track up on Tidal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTrackId {
    Found(u64),
    NotFound,
}

impl ResolvedTrackId {
    pub fn id(&self) -> Option<u64> {
        match self {
            ResolvedTrackId::Found(id) => Some(*id),
            ResolvedTrackId::NotFound => None,
        }
    }
}

/// Text query sent to Tidal for a track: `"<title> <artist>"`.
pub fn search_query(track: &Track) -> String {
    format!("{} {}", track.title, track.artist)
}

impl TidalClient {
    /// Looks a track up and keeps Tidal's single best match.
    pub async fn search(&self, track: &Track) -> Result<ResolvedTrackId, SyncError> {
        let query = search_query(track);
        let request = self.get("/search/tracks").query(&[
            ("query", query.as_str()),
            ("limit", "1"),
            ("offset", "0"),
            ("types", "TRACKS"),
            ("includeContributors", "true"),
        ]);

        let response: SearchResponse = self.send(request).await?;
        match response.items.first() {
            Some(item) => {
                debug!("{:?} matched track {} ({:?})", query, item.id, item.title);
                Ok(ResolvedTrackId::Found(item.id))
            }
            None => Ok(ResolvedTrackId::NotFound),
        }
    }

    /// Resolves every track, keeping the input order. One id per track.
    ///
    /// A track without match is reported and yields `NotFound`; a failed
    /// request aborts the whole batch.
    pub async fn resolve_tracks(
        &self,
        tracks: &[Track],
    ) -> Result<Vec<ResolvedTrackId>, SyncError> {
        let mut resolved = Vec::with_capacity(tracks.len());

        for (i, track) in tracks.iter().enumerate() {
            debug!(
                "Searching track {}/{}: {:?} by {:?}",
                i + 1,
                tracks.len(),
                track.title,
                track.artist
            );
            let id = self.search(track).await?;
            if id == ResolvedTrackId::NotFound {
                warning!("No match on Tidal for {:?} by {:?}", track.title, track.artist);
            }
            resolved.push(id);
        }

        Ok(resolved)
    }
}
