use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::core::{ServiceError, SynthesisError, ValidationError};

/// Application error type
///
/// Every variant answers with `{"error": <message>}`; the message is the one
/// the caller should see, not a generic status phrase.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or incomplete request
    BadRequest(String),
    /// The speech engine failed; no audio is returned
    Synthesis(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Synthesis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg) | AppError::Synthesis(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::BadRequest(msg) => tracing::warn!("Bad request: {}", msg),
            AppError::Synthesis(msg) => tracing::error!("Synthesis failed: {}", msg),
        }

        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::Synthesis(msg) => write!(f, "Synthesis failed: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        AppError::Synthesis(err.message)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => e.into(),
            ServiceError::Synthesis(e) => e.into(),
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
