use thiserror::Error;

/// Errors produced by the relay.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    #[error("No active session: complete the authorization flow before revoking")]
    NoActiveSession,

    #[error("Unknown, expired, or missing state parameter in callback")]
    StateMismatch,

    #[error("Callback carried no authorization code")]
    MissingCode,

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}
