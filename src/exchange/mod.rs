//! Exchange Module
//!
//! The retrieval-coordination protocol and its garbage-collection sweep:
//! the logic that turns an ordinary blob store into a single-consumer,
//! expiring, at-most-once channel.

mod coordinator;
mod naming;
mod sweeper;

#[cfg(test)]
mod property_tests;

pub use coordinator::Exchange;
pub use naming::gate_name;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ExchangeError;

// == Public Constants ==
/// Maximum allowed key length in bytes.
///
/// Keys flow into gate names, which must stay service-name-legal.
pub const MAX_KEY_LENGTH: usize = 64;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Blob metadata field carrying the entry expiry as decimal epoch ms.
pub const EXPIRY_METADATA_KEY: &str = "expirytimeepochms";

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

/// Maps a leaf-service failure into the opaque server-side error.
pub(crate) fn server_error(e: impl std::fmt::Display) -> ExchangeError {
    ExchangeError::Server(e.to_string())
}
