use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Pending authorization flows older than this are rejected and pruned.
const STATE_TTL_MINUTES: i64 = 10;

/// Tokens obtained from a completed authorization-code exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer token for API calls
    pub access_token: String,
    /// Refresh token, present when the consent included offline access
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Access token expiration time (UTC)
    pub expires_at: Option<DateTime<Utc>>,
    /// Space-delimited scopes actually granted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Token type, `Bearer` for this flow
    pub token_type: String,
}

impl Credential {
    /// Check if the access token is past its reported expiry
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }
}

/// Session state for the relay: pending authorization flows and the most
/// recently obtained credential.
///
/// Clones share the same underlying state. The credential is last-write-wins
/// across concurrent callbacks and is never cleared, revocation happens on
/// the provider side only.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionState>>,
}

#[derive(Debug, Default)]
struct SessionState {
    /// State tokens issued at `/`, keyed to their issue time
    pending: HashMap<String, DateTime<Utc>>,
    /// Credential from the last successful exchange
    credential: Option<Credential>,
}

impl SessionStore {
    /// Create an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a random state token and record the flow as pending.
    /// Stale pending flows are pruned on the way.
    pub fn issue_state(&self) -> String {
        let state = generate_state();
        let cutoff = Utc::now() - Duration::minutes(STATE_TTL_MINUTES);

        let mut inner = self.inner.write().unwrap();
        inner.pending.retain(|_, issued_at| *issued_at > cutoff);
        inner.pending.insert(state.clone(), Utc::now());

        state
    }

    /// Consume a pending state token.
    ///
    /// Returns false for unknown, already consumed, or expired tokens.
    pub fn take_state(&self, state: &str) -> bool {
        let cutoff = Utc::now() - Duration::minutes(STATE_TTL_MINUTES);

        let mut inner = self.inner.write().unwrap();
        match inner.pending.remove(state) {
            Some(issued_at) => issued_at > cutoff,
            None => false,
        }
    }

    /// Store a credential, replacing any previous one
    pub fn store(&self, credential: Credential) {
        let mut inner = self.inner.write().unwrap();
        inner.credential = Some(credential);
    }

    /// Get the most recently stored credential
    pub fn current(&self) -> Option<Credential> {
        let inner = self.inner.read().unwrap();
        inner.credential.clone()
    }
}

/// Generate a URL-safe random state token (16 bytes, base64 no-pad)
fn generate_state() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..16).map(|_| rng.gen()).collect();
    URL_SAFE_NO_PAD.encode(&random_bytes)
}
