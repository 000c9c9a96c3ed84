use log::debug;
use reqwest::{Client, RequestBuilder, StatusCode};

use crate::{
    config::SourceConfig,
    error::SyncError,
    fip::cursor::{decode_cursor, encode_cursor},
    types::{HistoryResponse, Track, TrackList},
};

/// Largest `first` value the history API honours in one request.
pub const MAX_PAGE_SIZE: usize = 100;

const PERSISTED_QUERY_HASH: &str =
    "f8f404573583a6a9410cd24637f214a0b93038696c1d20f19202111b51fd8270";

/// One decoded history page.
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub tracks: Vec<Track>,
    pub end_cursor: Option<String>,
}

/// Client for FIP's GraphQL history endpoint.
pub struct HistoryClient {
    client: Client,
    config: SourceConfig,
}

impl HistoryClient {
    pub fn new(config: SourceConfig) -> Self {
        HistoryClient {
            client: Client::new(),
            config,
        }
    }

    /// Retrieves `count` tracks aired on the station, starting at the Unix
    /// timestamp `from` (seconds).
    ///
    /// The API serves at most [`MAX_PAGE_SIZE`] tracks per request, so longer
    /// histories are assembled page by page. Every page after the first is
    /// requested at the previous page's `endCursor`. Pages are concatenated
    /// in the order they were fetched. A page holding more tracks than asked
    /// for is cut down to the requested size.
    ///
    /// # Errors
    ///
    /// Any failed page aborts the whole call and no track is returned:
    /// - `SyncError::Transport` when the request cannot be sent
    /// - `SyncError::Protocol` when the API answers with a non-200 status
    /// - `SyncError::Decode` when the body or a needed cursor is malformed
    /// - `SyncError::EmptyPage` when a page holds no track at all
    ///
    /// An empty page is never read as the end of the history.
    ///
    /// # Example
    ///
    /// ```
    /// let client = HistoryClient::new(settings.source);
    /// let tracks = client.fetch_history(1592890417, 250).await?; // three requests
    /// ```
    pub async fn fetch_history(&self, from: i64, count: usize) -> Result<TrackList, SyncError> {
        let mut tracks: TrackList = Vec::with_capacity(count.min(MAX_PAGE_SIZE));
        let mut remaining = count;
        let mut cursor = from;

        while remaining > 0 {
            let page_size = remaining.min(MAX_PAGE_SIZE);
            let page = self.fetch_page(cursor, page_size).await?;
            tracks.extend(page.tracks.into_iter().take(page_size));
            remaining -= page_size;

            if remaining > 0 {
                let end_cursor = page.end_cursor.ok_or_else(|| {
                    SyncError::Decode(format!("page at {} has no endCursor", cursor))
                })?;
                cursor = decode_cursor(&end_cursor)?;
                debug!("Next history page starts at {}", cursor);
            }
        }

        Ok(tracks)
    }

    /// Fetches a single page of at most `first` tracks aired since `from`.
    pub async fn fetch_page(&self, from: i64, first: usize) -> Result<HistoryPage, SyncError> {
        let after = encode_cursor(from);
        debug!(
            "GET {} (first={}, after={}, station={})",
            self.config.endpoint_url, first, after, self.config.station_id
        );

        let response = self.build_request(&after, first).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(SyncError::Protocol { status, body });
        }

        parse_page(&body, &after)
    }

    fn build_request(&self, after: &str, first: usize) -> RequestBuilder {
        let variables = serde_json::json!({
            "first": first,
            "after": after,
            "stationID": self.config.station_id,
        });
        let extensions = serde_json::json!({
            "persistedQuery": {
                "version": 1,
                "sha256Hash": PERSISTED_QUERY_HASH,
            }
        });

        self.client.get(&self.config.endpoint_url).query(&[
            ("operationName", "History".to_string()),
            ("variables", variables.to_string()),
            ("extensions", extensions.to_string()),
        ])
    }
}

/// Decodes a history response body. `after` is only used for error context.
pub fn parse_page(body: &str, after: &str) -> Result<HistoryPage, SyncError> {
    let response: HistoryResponse = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(SyncError::Protocol {
            status: StatusCode::OK,
            body: messages.join("; "),
        });
    }

    let Some(data) = response.data else {
        return Err(SyncError::EmptyPage {
            cursor: after.to_string(),
        });
    };

    let timeline = data.timeline_cursor;
    let tracks: Vec<Track> = timeline
        .edges
        .into_iter()
        .map(|edge| Track::from(edge.node))
        .collect();

    if tracks.is_empty() {
        return Err(SyncError::EmptyPage {
            cursor: after.to_string(),
        });
    }

    Ok(HistoryPage {
        tracks,
        end_cursor: timeline.page_info.and_then(|p| p.end_cursor),
    })
}
