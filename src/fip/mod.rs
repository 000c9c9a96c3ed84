//! # FIP history extraction
//!
//! Client for the GraphQL endpoint behind fip.fr's "what was that song"
//! history. The endpoint serves at most 100 tracks per request and pages
//! backward through time with a cursor that is simply a base64-encoded Unix
//! timestamp.
//!
//! [`HistoryClient::fetch_history`] hides the paging: it asks for as many
//! pages as needed to reach the requested count, feeding each page's
//! `endCursor` into the next request.

pub mod cursor;
pub mod history;

pub use history::{HistoryClient, HistoryPage, MAX_PAGE_SIZE};
