//! Bank Transfer Simulator Core
//!
//! Two accounts, two concurrent actors moving fixed amounts in opposite
//! directions, and a deadline watchdog.
//!
//! # Architecture
//!
//! - **models**: Domain types (Account, Event, money helpers)
//! - **settlement**: Pairwise lock protocol and the transfer operation
//! - **orchestrator**: Termination state, transfer actors, watchdog, run loop
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. Account locks are always taken lower id first
//! 3. Total balance is conserved by every transfer
//! 4. The termination reason is recorded once and never changes

// Module declarations
pub mod models;
pub mod orchestrator;
pub mod settlement;

// Re-exports for convenience
pub use models::{
    account::{Account, AccountError, AccountId, AccountSnapshot},
    event::{Event, EventLog},
    money::{format_amount, parse_amount, AmountError},
};
pub use orchestrator::{
    AccountConfig, Orchestrator, RunSummary, SimulationConfig, SimulationError, Termination,
    TerminationReason, ACCOUNT_A, ACCOUNT_B,
};
pub use settlement::{transfer, TransferOutcome, TransferRecord};
