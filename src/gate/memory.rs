//! In-memory gate service.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::service::{Claim, GateError, GateHandle, GateService};

/// One open gate: its token queue plus the retention deadline.
#[derive(Debug)]
struct GateSlot {
    tokens: VecDeque<String>,
    expires_at: Instant,
}

impl GateSlot {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory gate service backed by a mutex-guarded map of token queues.
///
/// Gates past their retention window are dropped lazily on access, so an
/// expired gate is indistinguishable from a deleted one.
#[derive(Clone, Default)]
pub struct MemoryGateService {
    gates: Arc<Mutex<HashMap<String, GateSlot>>>,
}

impl MemoryGateService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GateService for MemoryGateService {
    async fn open(&self, name: &str, retention: Duration) -> Result<GateHandle, GateError> {
        let mut gates = self.gates.lock().await;
        match gates.get(name) {
            Some(slot) if !slot.is_expired() => {}
            _ => {
                gates.insert(
                    name.to_string(),
                    GateSlot {
                        tokens: VecDeque::new(),
                        expires_at: Instant::now() + retention,
                    },
                );
            }
        }
        Ok(GateHandle::new(name))
    }

    async fn deposit(&self, handle: &GateHandle, token: &str) -> Result<(), GateError> {
        let mut gates = self.gates.lock().await;
        match gates.get_mut(handle.name()) {
            Some(slot) if !slot.is_expired() => {
                slot.tokens.push_back(token.to_string());
                Ok(())
            }
            _ => Err(GateError::NoSuchGate(handle.name().to_string())),
        }
    }

    async fn claim(&self, name: &str) -> Result<Claim, GateError> {
        let mut gates = self.gates.lock().await;
        if gates.get(name).is_some_and(|slot| slot.is_expired()) {
            gates.remove(name);
        }
        match gates.get_mut(name) {
            Some(slot) => Ok(slot
                .tokens
                .pop_front()
                .map(Claim::Token)
                .unwrap_or(Claim::Empty)),
            None => Err(GateError::NoSuchGate(name.to_string())),
        }
    }

    async fn close(&self, name: &str) -> Result<(), GateError> {
        let mut gates = self.gates.lock().await;
        gates.remove(name);
        Ok(())
    }
}
