use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::RelayError;

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            RelayError::NoActiveSession => (StatusCode::CONFLICT, "no_active_session"),
            RelayError::StateMismatch => (StatusCode::BAD_REQUEST, "state_mismatch"),
            RelayError::MissingCode => (StatusCode::BAD_REQUEST, "missing_code"),
            RelayError::ApiError { .. } | RelayError::HttpError(_) => {
                (StatusCode::BAD_GATEWAY, "upstream_error")
            }
            RelayError::MissingEnv(_) | RelayError::InvalidEnv { .. } | RelayError::UrlError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = Json(serde_json::json!({
            "error": {
                "type": kind,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RelayError::NoActiveSession.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RelayError::StateMismatch.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::MissingCode.into_response().status(),
            StatusCode::BAD_REQUEST
        );

        let upstream = RelayError::ApiError {
            status: 400,
            message: "invalid_grant".to_string(),
        };
        assert_eq!(upstream.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
