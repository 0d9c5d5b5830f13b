//! HTTP error responses
//!
//! Every failure is rendered as `{"error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use converso::DomainError;

const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Domain(error) => match error {
                DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
                DomainError::Unauthorized | DomainError::QuotaExceeded => StatusCode::FORBIDDEN,
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::TokenAcquisitionFailed(_)
                | DomainError::MaxRetriesExceeded { .. }
                | DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// Error body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            INTERNAL_ERROR.to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (DomainError::Unauthorized, StatusCode::FORBIDDEN),
            (DomainError::QuotaExceeded, StatusCode::FORBIDDEN),
            (
                DomainError::Validation("name must not be empty".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::not_found("Companion", uuid::Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::TokenAcquisitionFailed("timeout".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::store("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }

    #[tokio::test]
    async fn test_client_errors_keep_message() {
        let (status, body) = body_of(ApiError::bad_request("Invalid action")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Invalid action" }));
    }

    #[tokio::test]
    async fn test_server_errors_hide_detail() {
        let error = ApiError::from(DomainError::MaxRetriesExceeded {
            attempts: 3,
            last_error: "Store error: JWT expired".to_string(),
        });
        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": INTERNAL_ERROR }));
    }
}
