//! Gate service trait and error type.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the gate backend.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("no such gate: {0}")]
    NoSuchGate(String),

    #[error("gate backend: {0}")]
    Backend(String),
}

/// Resolved reference to an open gate, analogous to a queue URL.
///
/// Handles are cheap and short-lived; callers re-derive gate names
/// deterministically rather than caching a handle across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateHandle {
    name: String,
}

impl GateHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of a claim attempt on a gate that still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// The token was present and has been removed by this call.
    Token(String),
    /// The gate exists but holds no token: already claimed or never armed.
    Empty,
}

/// A provider of per-name, single-reader, single-message conduits.
///
/// The exactly-once claim guarantee is only as strong as the backend's
/// receive semantics. A backend that can redeliver an unacknowledged message
/// within a visibility window could let two concurrent claimers both observe
/// a token; removal as part of the same receive call bounds that risk but
/// does not eliminate it.
#[async_trait]
pub trait GateService: Send + Sync {
    /// Creates a gate named `name` if absent; an existing gate under that
    /// name is reused. The retention window bounds how long an undeleted
    /// gate and its token persist without explicit deletion.
    async fn open(&self, name: &str, retention: Duration) -> Result<GateHandle, GateError>;

    /// Places one token in the gate.
    async fn deposit(&self, handle: &GateHandle, token: &str) -> Result<(), GateError>;

    /// Receive-and-remove the next token in a single call. Returns
    /// `Claim::Empty` when the gate exists without a token and
    /// `GateError::NoSuchGate` when the gate has been deleted.
    async fn claim(&self, name: &str) -> Result<Claim, GateError>;

    /// Deletes the gate. Idempotent: closing an absent gate is `Ok`.
    async fn close(&self, name: &str) -> Result<(), GateError>;
}
