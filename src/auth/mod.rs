pub mod oauth;
pub mod session;

pub use oauth::OAuthClient;
pub use session::{Credential, SessionStore};
