//! Form system error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the form kernel.
#[derive(Debug, Error)]
pub enum FormError {
    /// No form is registered under the requested name.
    #[error("form {0} not found")]
    NotFound(String),

    /// A named form reference does not resolve to a registered constructor.
    #[error("invalid form reference: {0}")]
    InvalidReference(String),

    /// Malformed builder input, e.g. an unresolvable enumeration name.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            FormError::NotFound(_) => (StatusCode::NOT_FOUND, "form not found", self.to_string()),
            FormError::InvalidReference(_) | FormError::Configuration(_) => {
                // Registration and builder errors are server-side mistakes;
                // clients get a vague message.
                tracing::error!(error = %self, "form configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error",
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({
                "error": error,
                "message": message,
            })),
        )
            .into_response()
    }
}

/// Result type alias using FormError.
pub type FormResult<T> = Result<T, FormError>;
