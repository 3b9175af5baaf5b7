use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::drive::SAMPLE_PAGE_SIZE;
use crate::error::RelayError;
use crate::server::state::AppState;

/// Query parameters Google sends to the callback route
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// `GET /`: start a flow by redirecting to the consent screen.
pub async fn initiate(State(state): State<Arc<AppState>>) -> Result<Response, RelayError> {
    let flow_state = state.sessions.issue_state();
    let url = state.oauth.authorization_url(&flow_state)?;

    info!("Redirecting to the consent screen");

    // Redirect::permanent answers 308, this route answers a plain 301
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response())
}

/// `GET /oauth2callback`: finish a flow.
///
/// A provider-reported error is logged and answered with an empty 200
/// without touching the stored credential. Otherwise the state token is
/// consumed, the code is exchanged, the credential stored, and a sample
/// Drive listing is logged.
pub async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, RelayError> {
    if let Some(error) = params.error {
        warn!("Authorization error from provider: {}", error);
        return Ok(StatusCode::OK.into_response());
    }

    let flow_state = params.state.ok_or(RelayError::StateMismatch)?;
    if !state.sessions.take_state(&flow_state) {
        return Err(RelayError::StateMismatch);
    }

    let code = params.code.ok_or(RelayError::MissingCode)?;
    let credential = state.oauth.exchange_code(&code).await?;
    state.sessions.store(credential.clone());
    info!("Authorization code exchanged, credential stored");

    match state
        .drive
        .list_files(&credential.access_token, SAMPLE_PAGE_SIZE)
        .await
    {
        Ok(files) if files.is_empty() => info!("No files found."),
        Ok(files) => {
            info!("Files:");
            for file in &files {
                info!("{} ({})", file.name, file.id);
            }
        }
        Err(error) => warn!("Drive listing failed: {}", error),
    }

    Ok(StatusCode::OK.into_response())
}

/// `GET /revoke`: revoke the held access token at the provider.
///
/// The stored credential stays in place either way. Without a completed
/// flow this answers the no-active-session error.
pub async fn revoke(State(state): State<Arc<AppState>>) -> Result<Response, RelayError> {
    let credential = state
        .sessions
        .current()
        .ok_or(RelayError::NoActiveSession)?;

    match state.oauth.revoke(&credential.access_token).await {
        Ok(body) => info!("Response: {}", body),
        Err(error) => warn!("Revocation request failed: {}", error),
    }

    Ok(StatusCode::OK.into_response())
}
