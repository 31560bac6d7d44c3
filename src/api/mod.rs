//! API Module
//!
//! HTTP handlers and routing for the exchange server REST API.
//!
//! # Endpoints
//! - `POST /store` - Store a value under a key with a TTL
//! - `GET /get/:key` - Retrieve a value exactly once
//! - `POST /cleanup` - Sweep expired entries
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
