//! Error types for the reference service double.
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Body |
//! |-------|-------------|------|
//! | AuthenticationFailed | 401 | `{"message": "Authentication failed"}` |
//! | InvalidToken | 401 | `{"message": "Invalid token"}` |
//! | NotFound | 404 | `{"message": "Resource not found"}` |
//! | Validation | 422 | `[{"field": ..., "message": ...}]` |
//! | BadRequest | 400 | `{"message": ...}` |
//! | Internal | 500 | `{"message": ...}` |

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::model::{Collection, FieldViolation};

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A write was attempted without credentials.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The bearer token is not accepted.
    #[error("Invalid token")]
    InvalidToken,

    /// The record or route does not exist.
    #[error("Resource not found")]
    NotFound,

    /// The body failed field validation.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// The body is not a JSON object.
    #[error("{message}")]
    BadRequest {
        /// Description of the problem.
        message: String,
    },

    /// Unexpected failure.
    #[error("{message}")]
    Internal {
        /// Description of the problem.
        message: String,
    },
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AuthenticationFailed | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(violations) => {
                debug!(count = violations.len(), "Returning validation errors");
                (status, Json(violations)).into_response()
            }
            ApiError::Internal { ref message } => {
                error!(%message, "Internal error");
                (status, Json(json!({ "message": message }))).into_response()
            }
            other => (status, Json(json!({ "message": other.to_string() }))).into_response(),
        }
    }
}

/// Errors raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id.
    #[error("{collection}/{id} not found")]
    NotFound {
        /// Collection searched.
        collection: Collection,
        /// Requested id.
        id: u64,
    },

    /// The record failed field validation.
    #[error("invalid {collection} record")]
    Invalid {
        /// Collection written to.
        collection: Collection,
        /// Field violations, in field order.
        violations: Vec<FieldViolation>,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound,
            StoreError::Invalid { violations, .. } => ApiError::Validation(violations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::AuthenticationFailed.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Validation(vec![]).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(ApiError::NotFound.to_string(), "Resource not found");
    }

    #[test]
    fn test_store_error_conversion() {
        let err: ApiError = StoreError::NotFound {
            collection: Collection::Users,
            id: 4,
        }
        .into();
        assert!(matches!(err, ApiError::NotFound));

        let err: ApiError = StoreError::Invalid {
            collection: Collection::Users,
            violations: vec![FieldViolation::new("email", "can't be blank")],
        }
        .into();
        match err {
            ApiError::Validation(v) => assert_eq!(v[0].field, "email"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
