use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::relay_core::{CompletionError, SendError};

/// Request-level failures. Every handler returns `Result<T, ApiError>`;
/// the `IntoResponse` impl turns the error into a JSON body with the
/// matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SendError> for ApiError {
    fn from(err: SendError) -> ApiError {
        match err {
            SendError::Completion(CompletionError::Api { status, body }) => {
                ApiError::Upstream { status, body }
            }
            SendError::Completion(other) => ApiError::Internal(other.into()),
            SendError::Store(err) => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::NotFound(message) => message.clone(),
            ApiError::Upstream { status, body } => {
                error!(status = *status, "completion api returned an error");
                body.clone()
            }
            // Full detail stays in the log; the client sees a generic line.
            ApiError::Internal(err) => {
                error!(error = ?err, "request failed");
                "internal server error".to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(
            ApiError::NotFound("No messages found.".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Upstream { status: 429, body: String::new() }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::Internal(anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unmappable_upstream_status_falls_back_to_bad_gateway() {
        let err = ApiError::Upstream { status: 7, body: String::new() };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn send_errors_map_onto_api_errors() {
        let upstream: ApiError = SendError::Completion(CompletionError::Api {
            status: 503,
            body: "down".to_string(),
        })
        .into();
        assert!(matches!(upstream, ApiError::Upstream { status: 503, .. }));

        let internal: ApiError = SendError::Store(anyhow!("disk full")).into();
        assert!(matches!(internal, ApiError::Internal(_)));
    }
}
