//! Account model
//!
//! An account is shared between both transfer actors. Its identity and its
//! per-attempt transfer amount never change after construction; everything
//! that does change (balance, successful transfer count) lives in a
//! [`Ledger`] behind the account's own exclusive lock.
//!
//! CRITICAL: All money values are i64 (cents)

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable small integer identity of an account (1 or 2)
///
/// The ordering of ids is the global lock acquisition order, see
/// [`crate::settlement::lock_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(u8);

impl AccountId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during account operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Transfer amount for account {id} must be positive, got {amount}")]
    NonPositiveTransferAmount { id: AccountId, amount: i64 },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },
}

/// Mutable account state, only reachable through [`Account::lock`]
#[derive(Debug)]
pub struct Ledger {
    balance: i64,
    successful_transfers: u64,
}

impl Ledger {
    /// Current balance (cents). May be negative if the account was opened
    /// with a negative balance.
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Number of outbound transfers that completed from this account
    pub fn successful_transfers(&self) -> u64 {
        self.successful_transfers
    }

    /// Whether the balance covers `amount`. Equality is enough.
    pub fn can_cover(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Remove `amount` from the balance
    ///
    /// Fails without touching the balance when it is strictly less than
    /// `amount`.
    pub fn debit(&mut self, amount: i64) -> Result<(), AccountError> {
        if !self.can_cover(amount) {
            return Err(AccountError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Add `amount` to the balance
    pub fn credit(&mut self, amount: i64) {
        self.balance += amount;
    }

    /// Count one completed outbound transfer
    pub fn record_transfer(&mut self) {
        self.successful_transfers += 1;
    }
}

/// A balance-holding account with its own exclusive lock
///
/// # Example
/// ```
/// use bank_transfer_core::{Account, AccountId};
///
/// let account = Account::new(AccountId::new(1), 10_000, 3_000).unwrap();
/// assert_eq!(account.transfer_amount(), 3_000);
///
/// {
///     let mut ledger = account.lock();
///     ledger.debit(3_000).unwrap();
///     ledger.record_transfer();
/// }
///
/// let snapshot = account.snapshot();
/// assert_eq!(snapshot.balance, 7_000);
/// assert_eq!(snapshot.successful_transfers, 1);
/// ```
#[derive(Debug)]
pub struct Account {
    id: AccountId,

    /// Fixed per-attempt amount for transfers out of this account (cents)
    transfer_amount: i64,

    ledger: Mutex<Ledger>,
}

impl Account {
    /// Create an account with an opening balance and a fixed transfer amount
    ///
    /// The opening balance may be any value; the transfer amount must be
    /// strictly positive.
    pub fn new(
        id: AccountId,
        opening_balance: i64,
        transfer_amount: i64,
    ) -> Result<Self, AccountError> {
        if transfer_amount <= 0 {
            return Err(AccountError::NonPositiveTransferAmount {
                id,
                amount: transfer_amount,
            });
        }

        Ok(Self {
            id,
            transfer_amount,
            ledger: Mutex::new(Ledger {
                balance: opening_balance,
                successful_transfers: 0,
            }),
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn transfer_amount(&self) -> i64 {
        self.transfer_amount
    }

    /// Acquire this account's exclusive lock
    ///
    /// Blocks until the lock is available. Callers that need two accounts
    /// at once must go through [`crate::settlement::lock_pair`] instead.
    pub fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock()
    }

    /// Copy the current state under the lock
    pub fn snapshot(&self) -> AccountSnapshot {
        let ledger = self.lock();
        AccountSnapshot {
            id: self.id,
            balance: ledger.balance,
            transfer_amount: self.transfer_amount,
            successful_transfers: ledger.successful_transfers,
        }
    }
}

/// Point-in-time copy of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub balance: i64,
    pub transfer_amount: i64,
    pub successful_transfers: u64,
}
