use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::SyncError;

/// Encodes a Unix timestamp (seconds) the way the history API expects its
/// `after` cursor: the decimal digits, base64-encoded.
pub fn encode_cursor(timestamp: i64) -> String {
    STANDARD.encode(timestamp.to_string())
}

/// Decodes an `endCursor` back into a Unix timestamp.
pub fn decode_cursor(cursor: &str) -> Result<i64, SyncError> {
    let bytes = STANDARD
        .decode(cursor.trim())
        .map_err(|e| SyncError::Decode(format!("cursor {:?} is not base64: {}", cursor, e)))?;
    let digits = String::from_utf8(bytes)
        .map_err(|e| SyncError::Decode(format!("cursor {:?} is not UTF-8: {}", cursor, e)))?;

    digits
        .parse::<i64>()
        .map_err(|e| SyncError::Decode(format!("cursor {:?} is not a timestamp: {}", cursor, e)))
}
