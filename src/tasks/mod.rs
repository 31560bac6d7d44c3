//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cleanup sweep: reclaims expired, unclaimed entries at configured
//!   intervals

mod cleanup;

pub use cleanup::spawn_sweep_task;
