//! HTTP error mapping
//!
//! Every handler returns [`ApiError`], rendered as
//! `{"error": {"message": ..., "type": ...}}` with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::core::access::AccessError;
use crate::core::input_validator::ValidationError;
use crate::core::keep::{CheckInError, LedgerError};
use crate::database::is_unique_violation;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            ApiError::Conflict("A record with the same key already exists".to_string())
        } else {
            ApiError::Database(err)
        }
    }
}

impl From<CheckInError> for ApiError {
    fn from(err: CheckInError) -> Self {
        match err {
            CheckInError::Ledger(e) => ApiError::Ledger(e),
            CheckInError::KeepNotFound(id) => ApiError::NotFound(format!("Player keep {id}")),
            CheckInError::Database(e) => ApiError::from(e),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Ledger(_) => StatusCode::BAD_REQUEST,
            ApiError::Access(AccessError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            ApiError::Access(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation(_) | ApiError::Ledger(_) => "invalid_request_error",
            ApiError::Access(AccessError::Unauthenticated) => "authentication_error",
            ApiError::Access(_) => "permission_error",
            ApiError::NotFound(_) => "not_found_error",
            ApiError::Conflict(_) => "conflict_error",
            ApiError::Database(_) | ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage details stay in the log
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "The request could not be completed".to_string()
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
            self.to_string()
        };

        (
            status,
            Json(serde_json::json!({
                "error": {
                    "message": message,
                    "type": self.error_type()
                }
            })),
        )
            .into_response()
    }
}
