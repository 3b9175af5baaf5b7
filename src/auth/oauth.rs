use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::auth::session::Credential;
use crate::config::RelayConfig;
use crate::error::RelayError;

/// OAuth client for the authorization-code flow against Google.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: RelayConfig,
    http: reqwest::Client,
}

/// Token endpoint response for the authorization-code grant
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_credential(self) -> Credential {
        Credential {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self
                .expires_in
                .map(|seconds| Utc::now() + chrono::Duration::seconds(seconds)),
            scope: self.scope,
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
        }
    }
}

impl OAuthClient {
    /// Create a new OAuth client sharing the given HTTP client
    pub fn new(config: RelayConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Build the consent-screen URL carrying the per-flow state token.
    pub fn authorization_url(&self, state: &str) -> Result<String, RelayError> {
        let mut url = url::Url::parse(&self.config.auth_url)?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("access_type", "offline")
            .append_pair("include_granted_scopes", "true")
            .append_pair("state", state);

        Ok(url.to_string())
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(&self, code: &str) -> Result<Credential, RelayError> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(RelayError::ApiError { status, message });
        }

        let token_response: TokenResponse = response.json().await?;
        Ok(token_response.into_credential())
    }

    /// Revoke an access token at the provider.
    ///
    /// The body sent is exactly `token=<access_token>`. The provider's raw
    /// response body is returned for logging whatever the status; only a
    /// transport failure is an error.
    pub async fn revoke(&self, access_token: &str) -> Result<String, RelayError> {
        let response = self
            .http
            .post(&self.config.revoke_url)
            .form(&[("token", access_token)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Revocation endpoint replied with status {}", status);

        Ok(body)
    }
}
