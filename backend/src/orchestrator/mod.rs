//! Orchestrator - concurrent transfer run
//!
//! Owns the two accounts, drives the two transfer actors, and runs the
//! deadline watchdog.
//!
//! See `engine.rs` for full implementation.

pub mod actor;
pub mod checkpoint;
pub mod engine;
pub mod termination;

// Re-export main types for convenience
pub use actor::{ActorReport, Direction, NoopObserver, TransferActor, TransferObserver};
pub use checkpoint::{compute_config_hash, RunSummary};
pub use engine::{
    AccountConfig, Orchestrator, SimulationConfig, SimulationError, ACCOUNT_A, ACCOUNT_B,
};
pub use termination::{Termination, TerminationReason};
