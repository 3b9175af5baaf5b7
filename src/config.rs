use std::env;

use crate::error::RelayError;

/// Google's OAuth 2.0 consent endpoint.
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's token endpoint for the authorization-code exchange.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google's token revocation endpoint.
pub const GOOGLE_REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";

/// Base URL of the Drive v3 API.
pub const GOOGLE_DRIVE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Scopes requested when `SCOPES` is not set.
pub const DEFAULT_SCOPES: [&str; 5] = [
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/drive.metadata.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
    "https://www.googleapis.com/auth/spreadsheets.readonly",
];

const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the relay.
///
/// The Google endpoints are plain fields so tests can point the relay at a
/// local mock server.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// OAuth client ID issued by the Google Cloud console
    pub client_id: String,
    /// OAuth client secret paired with the client ID
    pub client_secret: String,
    /// Redirect URL registered for the client (the `/oauth2callback` route)
    pub redirect_url: String,
    /// TCP port for the HTTP listener
    pub port: u16,
    /// Scopes requested on the consent screen
    pub scopes: Vec<String>,
    /// Authorization (consent) endpoint
    pub auth_url: String,
    /// Token exchange endpoint
    pub token_url: String,
    /// Token revocation endpoint
    pub revoke_url: String,
    /// Drive API base URL
    pub drive_url: String,
}

impl RelayConfig {
    /// Read configuration from the process environment.
    ///
    /// `CLIENT_ID`, `CLIENT_SECRET`, and `REDIRECT_URL` are required.
    /// `SERVER_PORT` selects the listen port (default 8080) and `SCOPES`
    /// (whitespace separated) overrides the default scope set.
    pub fn from_env() -> Result<Self, RelayError> {
        Ok(Self {
            client_id: require_env("CLIENT_ID")?,
            client_secret: require_env("CLIENT_SECRET")?,
            redirect_url: require_env("REDIRECT_URL")?,
            port: parse_port(env::var("SERVER_PORT").ok())?,
            scopes: parse_scopes(env::var("SCOPES").ok()),
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            revoke_url: GOOGLE_REVOKE_URL.to_string(),
            drive_url: GOOGLE_DRIVE_URL.to_string(),
        })
    }
}

fn require_env(name: &'static str) -> Result<String, RelayError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(RelayError::MissingEnv(name)),
    }
}

fn parse_port(raw: Option<String>) -> Result<u16, RelayError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw.trim().parse().map_err(|_| RelayError::InvalidEnv {
            name: "SERVER_PORT",
            reason: format!("expected a TCP port number, got {raw:?}"),
        }),
    }
}

fn parse_scopes(raw: Option<String>) -> Vec<String> {
    let scopes: Vec<String> = raw
        .as_deref()
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    if scopes.is_empty() {
        DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
    } else {
        scopes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), DEFAULT_PORT);
    }

    #[test]
    fn test_port_parses_and_rejects() {
        assert_eq!(parse_port(Some("3000".to_string())).unwrap(), 3000);
        assert_eq!(parse_port(Some(" 3000 ".to_string())).unwrap(), 3000);

        let err = parse_port(Some("http".to_string())).unwrap_err();
        assert!(matches!(
            err,
            RelayError::InvalidEnv {
                name: "SERVER_PORT",
                ..
            }
        ));
    }

    #[test]
    fn test_scopes_default_set() {
        let scopes = parse_scopes(None);
        assert_eq!(scopes.len(), DEFAULT_SCOPES.len());
        assert!(scopes
            .iter()
            .any(|s| s.ends_with("drive.metadata.readonly")));
    }

    #[test]
    fn test_scopes_override() {
        let scopes = parse_scopes(Some("openid email".to_string()));
        assert_eq!(scopes, vec!["openid", "email"]);

        // Blank override falls back to the defaults
        let scopes = parse_scopes(Some("   ".to_string()));
        assert_eq!(scopes.len(), DEFAULT_SCOPES.len());
    }
}
