use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use database_layer::DatabaseError;
use delivery_service::DeliveryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error type/code
    pub error_type: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Main API error enum.
///
/// Display strings are the wire messages, so every variant renders the
/// exact text callers are promised ("No balance", "Already requested",
/// ...). Failures that happen after a successful dispatch never become
/// an `ApiError` at all; they are logged in the pipeline and swallowed.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Authentication { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("No balance")]
    NoBalance,

    #[error("to_mail address is blocked")]
    Blocked,

    #[error("Failed to send mail")]
    Delivery(#[source] DeliveryError),

    #[error("Internal server error")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Conflict maps to 400, not 409: "Already requested" is part of the
    /// gateway's wire contract.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Conflict { .. } => StatusCode::BAD_REQUEST,
            ApiError::NoBalance => StatusCode::BAD_REQUEST,
            ApiError::Blocked => StatusCode::BAD_REQUEST,
            ApiError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::Authentication { .. } => "authentication_error",
            ApiError::Conflict { .. } => "conflict",
            ApiError::NoBalance => "no_balance",
            ApiError::Blocked => "policy_violation",
            ApiError::Delivery(_) => "delivery_error",
            ApiError::Database(_) => "database_error",
        }
    }
}

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        ApiError::Delivery(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // Provider and store details stay in the logs; the response body
        // carries only the contract message.
        match &self {
            ApiError::Delivery(source) => error!(
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                source = %source,
                "Delivery failed"
            ),
            ApiError::Database(source) => error!(
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                source = %source,
                "Store access failed"
            ),
            _ => error!(
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API error occurred"
            ),
        }

        let error_response = ApiErrorResponse {
            error_type: self.error_type().to_string(),
            message: self.to_string(),
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_messages() {
        assert_eq!(ApiError::NoBalance.to_string(), "No balance");
        assert_eq!(
            ApiError::Blocked.to_string(),
            "to_mail address is blocked"
        );
        assert_eq!(
            ApiError::validation("Invalid to mail").to_string(),
            "Invalid to mail"
        );
        assert_eq!(
            ApiError::conflict("Already requested").to_string(),
            "Already requested"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NoBalance.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Blocked.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::conflict("Already requested").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::authentication("Unauthorized").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Database(DatabaseError::QueryFailed("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_detail_not_in_body() {
        let err = ApiError::Database(DatabaseError::QueryFailed("secret detail".to_string()));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
