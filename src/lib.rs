//! Small Google OAuth2 authorization-code relay.
//!
//! Three routes drive the flow: `/` redirects to the consent screen,
//! `/oauth2callback` exchanges the returned code for tokens and makes one
//! sample Drive call, and `/revoke` revokes the held token at the provider.

pub mod auth;
pub mod config;
pub mod drive;
pub mod error;
pub mod logging;
pub mod server;

pub use auth::{Credential, OAuthClient, SessionStore};
pub use config::RelayConfig;
pub use error::RelayError;
