//! Settlement Module
//!
//! Everything that happens while a transfer holds account locks:
//! - The pairwise lock protocol (fixed global acquisition order)
//! - The transfer operation (check-and-move under both locks)
//!
//! # Critical Invariants
//!
//! 1. **Deadlock freedom**: every caller takes the two account locks in the same order
//! 2. **Atomicity**: the funds check and the debit/credit are never separated
//! 3. **Balance Conservation**: total balance never changes during a transfer
//!
//! # Example
//!
//! ```rust
//! use bank_transfer_core::{Account, AccountId, Termination, TerminationReason};
//! use bank_transfer_core::settlement;
//!
//! let a = Account::new(AccountId::new(1), 3_000, 3_000).unwrap();
//! let b = Account::new(AccountId::new(2), 0, 1_000).unwrap();
//! let termination = Termination::new();
//!
//! // Exactly the balance: allowed, leaves zero
//! assert!(settlement::transfer(&a, &b, &termination).is_success());
//! assert_eq!(a.snapshot().balance, 0);
//!
//! // Nothing left: the run terminates
//! assert!(!settlement::transfer(&a, &b, &termination).is_success());
//! assert_eq!(
//!     termination.reason(),
//!     Some(TerminationReason::InsufficientFunds { account: AccountId::new(1) })
//! );
//! ```

pub mod lock_order;
pub mod transfer;

// Re-export public API
pub use lock_order::{acquisition_order, lock_pair, LockedPair};
pub use transfer::{transfer, TransferOutcome, TransferRecord};
