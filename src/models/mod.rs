//! Models Module
//!
//! Request and response DTOs for the exchange server API.

mod requests;
mod responses;

pub use requests::StoreRequest;
pub use responses::{
    CleanupResponse, ErrorResponse, HealthResponse, RetrieveResponse, StoreResponse,
};
