//! Relay errors and their HTTP shape

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::queue::QueueError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid enqueue body: {0}")]
    InvalidInput(String),
    #[error("webhook token mismatch")]
    Unauthorized,
    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RelayError::Unauthorized => StatusCode::FORBIDDEN,
            RelayError::Queue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the producer
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::InvalidInput(_) => "Invalid JSON",
            RelayError::Unauthorized => "Bad token",
            RelayError::Queue(_) => "Storage unavailable",
        }
    }

    /// Label for the rejection counter
    pub fn reason(&self) -> &'static str {
        match self {
            RelayError::InvalidInput(_) => "invalid_input",
            RelayError::Unauthorized => "unauthorized",
            RelayError::Queue(_) => "storage",
        }
    }
}

/// `{ok:false, error:<message>}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: &'static str,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status.as_u16() {
            400..=499 => tracing::warn!(status = %status, error = %self, "Enqueue rejected"),
            500..=599 => tracing::error!(status = %status, error = %self, "Enqueue failed"),
            _ => {}
        }

        let body = ErrorBody {
            ok: false,
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
