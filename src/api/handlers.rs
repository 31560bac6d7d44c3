//! API Handlers
//!
//! HTTP request handlers for each exchange server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use bytes::Bytes;

use crate::config::Config;
use crate::error::{ExchangeError, Result};
use crate::exchange::Exchange;
use crate::gate::MemoryGateService;
use crate::models::{
    CleanupResponse, HealthResponse, RetrieveResponse, StoreRequest, StoreResponse,
};
use crate::repo::MemoryBlobRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The retrieval coordinator
    pub exchange: Arc<Exchange>,
}

impl AppState {
    /// Creates a new AppState around an exchange.
    pub fn new(exchange: Exchange) -> Self {
        Self {
            exchange: Arc::new(exchange),
        }
    }

    /// Creates a new AppState from configuration, wiring the bundled
    /// in-memory leaf services. A cloud deployment would swap these for
    /// remote clients behind the same traits.
    pub fn from_config(config: &Config) -> Self {
        let repo = Arc::new(MemoryBlobRepository::new(config.data_container.clone()));
        let gates = Arc::new(MemoryGateService::new());
        Self::new(Exchange::new(repo, gates, config.namespace.clone()))
    }
}

/// Handler for POST /store
///
/// Stores a value under a key, retrievable exactly once within its TTL.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ExchangeError::BadRequest(error_msg));
    }

    state
        .exchange
        .store(&req.key, Bytes::from(req.value), req.ttl_ms)
        .await?;

    Ok(Json(StoreResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves and consumes the value for a key. Responds 410 Gone when the
/// entry was already claimed, has expired, or never existed.
pub async fn retrieve_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RetrieveResponse>> {
    let value = state.exchange.retrieve(&key).await?;
    let value = String::from_utf8(value.to_vec())
        .map_err(|_| ExchangeError::Server(format!("stored value for '{key}' is not UTF-8")))?;

    Ok(Json(RetrieveResponse::new(key, value)))
}

/// Handler for POST /cleanup
///
/// Runs one sweep over the blob repository, removing expired entries and
/// their gates.
pub async fn cleanup_handler(State(state): State<AppState>) -> Result<Json<CleanupResponse>> {
    let removed = state.exchange.sweep().await?;

    Ok(Json(CleanupResponse::new(removed)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
