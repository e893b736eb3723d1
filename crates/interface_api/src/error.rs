//! API error handling
//!
//! Every failure leaves the API as an [`ErrorEnvelope`]:
//!
//! ```json
//! {
//!   "timestamp": "2024-05-01T12:00:00Z",
//!   "status": 404,
//!   "error": "Not Found",
//!   "message": "Customer not found with ID: 7",
//!   "path": "/api/customers/7"
//! }
//! ```
//!
//! Domain and storage errors are classified here and nowhere else.
//! The request path is filled in by [`crate::middleware::error_envelope`].

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use core_kernel::PortError;
use domain_customer::{constraints, CustomerError};

/// Message returned when the email unique constraint is violated
pub const EMAIL_EXISTS_MESSAGE: &str = "Email already exists.";

/// Message returned for every other constraint violation
pub const CONSTRAINT_VIOLATED_MESSAGE: &str = "A unique constraint was violated.";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Uniform error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorEnvelope {
    /// Creates an envelope stamped with the current time
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
            path: path.into(),
        }
    }
}

/// Status and message of a failed request, left in the response
/// extensions for the envelope middleware
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorReport {
    /// Renders the envelope for the given request path
    pub fn render(&self, path: &str) -> Response {
        (self.status, Json(ErrorEnvelope::new(self.status, self.message.clone(), path))).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        error!(status = status.as_u16(), message = %message, "Request failed");

        let report = ErrorReport { status, message };
        let mut response = report.render("");
        response.extensions_mut().insert(report);
        response
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CustomerError::ValidationFailed(_) => ApiError::BadRequest(err.to_string()),
            CustomerError::IllegalState(message) => ApiError::BadRequest(message),
            CustomerError::Store(port) => port.into(),
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { message, .. } => ApiError::BadRequest(message),
            PortError::Conflict { constraint, message } => {
                error!(constraint = ?constraint, detail = %message, "Data integrity violation");
                if constraint.as_deref() == Some(constraints::CUSTOMER_EMAIL_UNIQUE) {
                    ApiError::Conflict(EMAIL_EXISTS_MESSAGE.to_string())
                } else {
                    ApiError::Conflict(CONSTRAINT_VIOLATED_MESSAGE.to_string())
                }
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
