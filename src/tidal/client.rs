use log::debug;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::{config::DestinationConfig, error::SyncError, types::SessionContext};

/// Country code used for requests sent before a session exists.
pub const DEFAULT_COUNTRY_CODE: &str = "US";

const ORIGIN: &str = "https://listen.tidal.com";
const SESSION_HEADER: &str = "X-Tidal-SessionId";

/// Authenticated view of the Tidal API for one account.
///
/// Holds the shared API token obtained from the tokens manifest and, after
/// [`TidalClient::login`], the account's session. Each account gets its own
/// client so no session state leaks between accounts.
pub struct TidalClient {
    client: Client,
    config: DestinationConfig,
    api_token: String,
    pub(crate) session: Option<SessionContext>,
}

impl TidalClient {
    pub fn new(config: DestinationConfig, api_token: impl Into<String>) -> Self {
        TidalClient {
            client: Client::new(),
            config,
            api_token: api_token.into(),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    pub(crate) fn require_session(&self) -> Result<&SessionContext, SyncError> {
        self.session.as_ref().ok_or(SyncError::NotAuthenticated)
    }

    pub(crate) fn get(&self, endpoint: &str) -> RequestBuilder {
        self.decorate(self.client.get(self.url(endpoint)))
    }

    pub(crate) fn post(&self, endpoint: &str) -> RequestBuilder {
        self.decorate(self.client.post(self.url(endpoint)))
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{base}{endpoint}",
            base = self.config.base_url.trim_end_matches('/'),
            endpoint = endpoint
        )
    }

    /// Adds what every Tidal call needs: the shared token and the country
    /// code as query parameters, the session header once logged in, and the
    /// web client's `Origin`.
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        let country_code = self
            .session
            .as_ref()
            .map(|s| s.country_code.as_str())
            .filter(|cc| !cc.is_empty())
            .unwrap_or(DEFAULT_COUNTRY_CODE);

        let request = request
            .query(&[("token", self.api_token.as_str()), ("countryCode", country_code)])
            .header("Origin", ORIGIN);

        match &self.session {
            Some(session) if !session.session_id.is_empty() => {
                request.header(SESSION_HEADER, session.session_id.as_str())
            }
            _ => request,
        }
    }

    /// Sends the request and returns the body of a 200 or 201 response.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<String, SyncError> {
        let request = request.build()?;
        debug!("{} {}", request.method(), request.url().path());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        match status {
            StatusCode::OK | StatusCode::CREATED => Ok(body),
            _ => Err(SyncError::Protocol { status, body }),
        }
    }

    /// Sends the request and decodes a successful JSON response into `T`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SyncError> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
