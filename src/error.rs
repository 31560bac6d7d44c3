//! Error types for the exchange server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Exchange Error Enum ==
/// Unified error type for the exchange server.
///
/// The three variants match what callers can act on: `BadRequest` is their
/// fault and never retried, `Gone` means there is nothing left to retrieve,
/// `Server` is opaque beyond "try again later or contact the operator".
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Malformed caller input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Entry was already claimed, expired, or never existed
    #[error("Gone: {0}")]
    Gone(String),

    /// Leaf-service failure, join timeout, or malformed persisted state
    #[error("Server error: {0}")]
    Server(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ExchangeError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ExchangeError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ExchangeError::Gone(msg) => (StatusCode::GONE, msg.clone()),
            ExchangeError::Server(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the exchange server.
pub type Result<T> = std::result::Result<T, ExchangeError>;
