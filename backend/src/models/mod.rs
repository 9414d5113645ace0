//! Domain models for the transfer simulator

pub mod account;
pub mod event;
pub mod money;

// Re-exports
pub use account::{Account, AccountError, AccountId, AccountSnapshot, Ledger};
pub use event::{Event, EventLog};
pub use money::{format_amount, parse_amount, AmountError};
