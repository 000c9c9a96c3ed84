use log::debug;
use reqwest::{Client, StatusCode};

use crate::{
    error::SyncError,
    tidal::TidalClient,
    types::{Account, SessionContext, TokensManifest},
};

/// Retrieves the API token every Tidal request must carry.
///
/// The token is not tied to a user. Tidal rotates it from time to time, so it
/// is read from a community-maintained manifest at the start of each run
/// instead of being hard-coded. A stale token shows up as 401s on the first
/// Tidal call.
pub async fn fetch_api_token(manifest_url: &str) -> Result<String, SyncError> {
    debug!("GET {}", manifest_url);
    let response = Client::new().get(manifest_url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    if status != StatusCode::OK {
        return Err(SyncError::Protocol { status, body });
    }

    let manifest: TokensManifest = serde_json::from_str(&body)?;
    if manifest.token.is_empty() {
        return Err(SyncError::Decode(
            "tokens manifest holds an empty token".to_string(),
        ));
    }

    Ok(manifest.token)
}

impl TidalClient {
    /// Logs `account` in and keeps the resulting session on the client.
    ///
    /// Subsequent requests carry the session id and use the account's
    /// country code.
    pub async fn login(&mut self, account: &Account) -> Result<&SessionContext, SyncError> {
        debug!("Logging in {}", account.username);
        let request = self.post("/login/username").form(&[
            ("username", account.username.as_str()),
            ("password", account.password.as_str()),
        ]);

        let session: SessionContext = self.send(request).await?;
        self.session = Some(session);
        self.require_session()
    }
}
