//! # Error Handling and Response Types
//!
//! Every failed request gets the same JSON shape:
//!
//! ```json
//! {
//!   "error": "Human-readable error message",
//!   "code": "machine_readable_error_code",
//!   "status_code": 404,
//!   "timestamp": "2024-01-01T12:00:00Z"
//! }
//! ```
//!
//! ## Error Classifications
//!
//! - **Validation Errors** (400 Bad Request): bad or missing package identifier
//! - **Not Found** (404 Not Found): the package has no Aptoide listing
//! - **Bad Gateway** (502): Aptoide unreachable or answering with errors
//! - **Gateway Timeout** (504): Aptoide did not answer in time
//! - **Internal Errors** (500 Internal Server Error): everything else

use crate::validation::ValidationError;
use aptoide_scraper::ScrapeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code
    #[schema(example = "not_found")]
    pub code: String,
    /// HTTP status code, repeated for convenience
    #[schema(example = 404)]
    pub status_code: u16,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

/// Error code classification for machine-readable error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    BadGateway,
    GatewayTimeout,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::NotFound => "not_found",
            ErrorCode::BadGateway => "bad_gateway",
            ErrorCode::GatewayTimeout => "gateway_timeout",
            ErrorCode::InternalError => "internal_error",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::BadGateway => StatusCode::BAD_GATEWAY,
            ErrorCode::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    GatewayTimeout(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ApiError::Validation(_) => ErrorCode::ValidationError,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::BadGateway(_) => ErrorCode::BadGateway,
            ApiError::GatewayTimeout(_) => ErrorCode::GatewayTimeout,
            ApiError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn to_error_response(&self) -> ApiErrorResponse {
        let code = self.error_code();
        ApiErrorResponse {
            error: self.to_string(),
            code: code.as_str().to_string(),
            status_code: code.http_status().as_u16(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        let message = err.to_string();
        match err {
            ScrapeError::NotFound(_) => ApiError::NotFound(message),
            ScrapeError::Timeout(_) => ApiError::GatewayTimeout(message),
            ref transport if transport.is_transport() => ApiError::BadGateway(message),
            _ => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status = code.http_status();

        match code {
            ErrorCode::ValidationError | ErrorCode::NotFound => {
                tracing::info!(error = %self, status = %status, "Request rejected")
            }
            _ => tracing::error!(error = %self, status = %status, "Request failed"),
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
