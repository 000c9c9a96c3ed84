use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album: String,
}

pub type TrackList = Vec<Track>;

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub title: String,
    pub artist: String,
    pub album: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsFile {
    #[serde(default)]
    pub tidal: Vec<Account>,
}

// FIP history API

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub data: Option<HistoryData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryData {
    pub timeline_cursor: TimelineCursor,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineCursor {
    #[serde(default)]
    pub edges: Vec<HistoryEdge>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEdge {
    pub node: HistoryNode,
}

/// One aired track. FIP puts the song title under `subtitle` and the artist
/// under `title`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryNode {
    #[serde(rename = "subtitle", default)]
    pub title: Option<String>,
    #[serde(rename = "title", default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
}

impl From<HistoryNode> for Track {
    fn from(node: HistoryNode) -> Self {
        Track {
            title: node.title.unwrap_or_default(),
            artist: node.artist.unwrap_or_default(),
            album: node.album.unwrap_or_default(),
        }
    }
}

// Tidal API

#[derive(Debug, Clone, Deserialize)]
pub struct TokensManifest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub session_id: String,
    pub country_code: String,
    pub user_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResponse {
    pub uuid: String,
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "deserialize_tidal_timestamp")]
    pub last_updated: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default, alias = "results")]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: u64,
    pub title: Option<String>,
}

/// Parses a Tidal timestamp into milliseconds since the Unix epoch.
///
/// Tidal writes `2020-07-25T00:30:00.000+0000`, which is not RFC 3339 because
/// of the offset format, so both shapes are accepted.
pub fn parse_tidal_timestamp(value: &str) -> Option<i64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    chrono::DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .ok()
        .map(|dt| dt.timestamp_millis())
}

fn deserialize_tidal_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_tidal_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid lastUpdated value {raw:?}")))
}
