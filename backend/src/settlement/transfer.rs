//! Transfer operation
//!
//! Moves the source account's fixed transfer amount to the destination,
//! under both account locks.
//!
//! # Transfer Flow
//!
//! ```text
//! lock_pair(source, destination)
//!     ├─ run already terminated?     → Aborted (no change)
//!     ├─ source.balance < amount?    → terminate(InsufficientFunds), InsufficientFunds
//!     └─ debit source, credit dest,  → Completed(record)
//!        count the source transfer
//! release both locks
//! ```
//!
//! # Critical Invariants
//!
//! - **Atomicity**: the funds check and the balance mutation happen under the
//!   same lock pair; no other actor can observe either account in between
//! - **Balance Conservation**: the sum of both balances is unchanged
//! - **Boundary**: `balance == amount` succeeds and leaves exactly 0

use crate::models::account::{Account, AccountId};
use crate::orchestrator::termination::{Termination, TerminationReason};
use crate::settlement::lock_order::lock_pair;
use serde::{Deserialize, Serialize};

/// Record of one completed transfer
///
/// Balances are the values left in each account at the moment the transfer
/// completed, captured while both locks were held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub source: AccountId,
    pub destination: AccountId,
    pub amount: i64,
    pub source_balance: i64,
    pub destination_balance: i64,
}

/// Result of one transfer attempt
///
/// Exactly one variant is produced per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Funds moved
    Completed(TransferRecord),

    /// The source could not cover the amount; this attempt terminated the
    /// run (or found it terminating concurrently, see [`Termination::terminate`])
    InsufficientFunds {
        account: AccountId,
        balance: i64,
        required: i64,
    },

    /// The run was already terminated when the locks were taken
    Aborted,
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Completed(_))
    }
}

/// Attempt one transfer from `source` to `destination`
///
/// Never fails in the `Result` sense: both stopping conditions are reported
/// as outcomes to the calling actor.
///
/// # Example
///
/// ```rust
/// use bank_transfer_core::{Account, AccountId, Termination};
/// use bank_transfer_core::settlement::transfer;
///
/// let a = Account::new(AccountId::new(1), 10_000, 3_000).unwrap();
/// let b = Account::new(AccountId::new(2), 5_000, 4_000).unwrap();
/// let termination = Termination::new();
///
/// let outcome = transfer(&a, &b, &termination);
/// assert!(outcome.is_success());
/// assert_eq!(a.snapshot().balance, 7_000);
/// assert_eq!(b.snapshot().balance, 8_000);
/// ```
pub fn transfer(
    source: &Account,
    destination: &Account,
    termination: &Termination,
) -> TransferOutcome {
    let amount = source.transfer_amount();
    let mut pair = lock_pair(source, destination);

    if termination.is_terminated() {
        return TransferOutcome::Aborted;
    }

    if pair.source.debit(amount).is_err() {
        // Recorded while the pair is still held
        termination.terminate(TerminationReason::InsufficientFunds {
            account: source.id(),
        });

        return TransferOutcome::InsufficientFunds {
            account: source.id(),
            balance: pair.source.balance(),
            required: amount,
        };
    }

    pair.destination.credit(amount);
    pair.source.record_transfer();

    TransferOutcome::Completed(TransferRecord {
        source: source.id(),
        destination: destination.id(),
        amount,
        source_balance: pair.source.balance(),
        destination_balance: pair.destination.balance(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts(
        balance_a: i64,
        amount_a: i64,
        balance_b: i64,
        amount_b: i64,
    ) -> (Account, Account) {
        (
            Account::new(AccountId::new(1), balance_a, amount_a).unwrap(),
            Account::new(AccountId::new(2), balance_b, amount_b).unwrap(),
        )
    }

    #[test]
    fn test_aborted_attempt_changes_nothing() {
        let (a, b) = accounts(10_000, 3_000, 0, 1);
        let termination = Termination::new();
        termination.terminate(TerminationReason::DeadlineExpired);

        assert_eq!(transfer(&a, &b, &termination), TransferOutcome::Aborted);
        assert_eq!(a.snapshot().balance, 10_000);
        assert_eq!(b.snapshot().balance, 0);
        assert_eq!(
            termination.reason(),
            Some(TerminationReason::DeadlineExpired)
        );
    }

    #[test]
    fn test_insufficient_funds_does_not_overwrite_earlier_reason() {
        let (a, b) = accounts(0, 100, 0, 100);
        let termination = Termination::new();

        assert!(!transfer(&a, &b, &termination).is_success());
        // Already terminated, so the second direction aborts instead
        assert_eq!(transfer(&b, &a, &termination), TransferOutcome::Aborted);
        assert_eq!(
            termination.reason(),
            Some(TerminationReason::InsufficientFunds {
                account: AccountId::new(1)
            })
        );
    }
}
