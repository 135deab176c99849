//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ConcertId, ConcertIdError, UnknownVoteType};
use crate::persistence::StoreError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "concert not found: 999",
///     "retryable": false
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Whether repeating the identical request may succeed.
    pub retryable: bool,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                 |
/// |-----------|------------|-----------------------------|
/// | 1000–1999 | Validation | 400 Bad Request             |
/// | 2000–2999 | Not Found  | 404 Not Found               |
/// | 3000–3999 | Server     | 500 / 503                   |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Referenced concert does not exist.
    #[error("concert not found: {0}")]
    ConcertNotFound(ConcertId),

    /// No `/api` route matches the request path.
    #[error("no such endpoint: {0}")]
    RouteNotFound(String),

    /// Vote type outside the closed set.
    #[error(transparent)]
    InvalidVoteType(#[from] UnknownVoteType),

    /// Malformed request: bad id, unparsable body, missing field.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Storage unreachable or timed out. Retryable.
    #[error("storage unavailable, retry later: {0}")]
    StorageUnavailable(String),

    /// Storage answered with an error.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidVoteType(_) => 1002,
            Self::ConcertNotFound(_) => 2001,
            Self::RouteNotFound(_) => 2002,
            Self::Storage(_) => 3001,
            Self::StorageUnavailable(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidVoteType(_) => StatusCode::BAD_REQUEST,
            Self::ConcertNotFound(_) | Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` if the caller may retry the same request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::StorageUnavailable(msg),
            StoreError::Query(msg) | StoreError::Corrupt(msg) => Self::Storage(msg),
        }
    }
}

impl From<ConcertIdError> for ApiError {
    fn from(err: ConcertIdError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                retryable: self.is_retryable(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
