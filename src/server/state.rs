use std::time::Duration;

use crate::auth::{OAuthClient, SessionStore};
use crate::config::RelayConfig;
use crate::drive::DriveClient;
use crate::error::RelayError;

/// Timeout applied to every outbound request
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across handlers
pub struct AppState {
    pub config: RelayConfig,
    pub oauth: OAuthClient,
    pub drive: DriveClient,
    pub sessions: SessionStore,
}

impl AppState {
    /// Build the shared state. One HTTP client backs both outbound clients.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

        Ok(Self {
            oauth: OAuthClient::new(config.clone(), http.clone()),
            drive: DriveClient::new(config.drive_url.clone(), http),
            sessions: SessionStore::new(),
            config,
        })
    }
}
