use std::{collections::HashSet, hash::Hash};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::{
    tidal::search::ResolvedTrackId,
    types::{Track, TrackTableRow},
};

/// Removes duplicates while keeping the first occurrence of each value in
/// place.
pub fn uniq<T: Eq + Hash + Clone>(values: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert((*v).clone()))
        .cloned()
        .collect()
}

/// Unique track ids to append, in first-seen order. Unresolved tracks are
/// dropped.
pub fn unique_track_ids(resolved: &[ResolvedTrackId]) -> Vec<u64> {
    let ids: Vec<u64> = resolved.iter().filter_map(ResolvedTrackId::id).collect();
    uniq(&ids)
}

/// Parses the `--from` argument into a Unix timestamp in seconds.
///
/// Accepts a raw timestamp (`1592890417`), a date (`2020-06-23`, midnight
/// UTC) or a date and time (`2020-06-23T05:33:37`, UTC).
pub fn parse_timestamp(value: &str) -> Result<i64, String> {
    let value = value.trim();

    if let Ok(ts) = value.parse::<i64>() {
        return Ok(ts);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.and_utc().timestamp());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| {
            format!(
                "Invalid time {:?}. Use a Unix timestamp, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
                value
            )
        })
}

/// Default start of the history window: 24 hours ago.
pub fn default_from() -> i64 {
    (Utc::now() - Duration::hours(24)).timestamp()
}

/// Default playlist title, e.g. `fip 2020-06-23 05:33`.
pub fn default_playlist_name(station: &str, from: i64) -> String {
    match DateTime::from_timestamp(from, 0) {
        Some(dt) => format!("{} {}", station, dt.format("%Y-%m-%d %H:%M")),
        None => format!("{} {}", station, from),
    }
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            title: t.title.clone(),
            artist: t.artist.clone(),
            album: t.album.clone(),
        })
        .collect()
}
