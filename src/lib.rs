//! Dead Drop - a one-time secret exchange server
//!
//! A producer stores a value under a key with a TTL; a single consumer may
//! retrieve it exactly once before it is claimed or expires.

pub mod api;
pub mod config;
pub mod error;
pub mod exchange;
pub mod gate;
pub mod models;
pub mod repo;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use exchange::Exchange;
pub use tasks::spawn_sweep_task;
