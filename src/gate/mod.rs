//! Gate Module
//!
//! The single-use, single-reader conduit that arbitrates the one legitimate
//! claim on an entry. Any backend offering "exactly one successful
//! receive-and-remove per message" satisfies the trait; the bundled backend
//! is in-memory.

mod memory;
mod service;

pub use memory::MemoryGateService;
pub use service::{Claim, GateError, GateHandle, GateService};
