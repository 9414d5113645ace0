//! Pairwise lock protocol
//!
//! A transfer must hold both account locks at once. Every caller acquires the
//! pair in the same global order (lower [`AccountId`] first), whichever
//! account is the source. With one total order there is no cyclic wait
//! between the A→B and B→A actors, so no deadlock.
//!
//! Release order does not matter; the guards drop when the [`LockedPair`]
//! goes out of scope.

use crate::models::account::{Account, AccountId, Ledger};
use parking_lot::MutexGuard;

/// Order in which the locks of two accounts must be taken
///
/// Depends only on the unordered pair: `acquisition_order(a, b)` and
/// `acquisition_order(b, a)` are equal.
///
/// # Example
/// ```
/// use bank_transfer_core::AccountId;
/// use bank_transfer_core::settlement::acquisition_order;
///
/// let one = AccountId::new(1);
/// let two = AccountId::new(2);
/// assert_eq!(acquisition_order(two, one), (one, two));
/// assert_eq!(acquisition_order(one, two), (one, two));
/// ```
pub fn acquisition_order(a: AccountId, b: AccountId) -> (AccountId, AccountId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Both ledgers of one transfer, addressed by role
#[derive(Debug)]
pub struct LockedPair<'a> {
    pub source: MutexGuard<'a, Ledger>,
    pub destination: MutexGuard<'a, Ledger>,
}

/// Lock `source` and `destination` following [`acquisition_order`]
///
/// Blocks until both locks are held. There is no timeout and no failure
/// path.
pub fn lock_pair<'a>(source: &'a Account, destination: &'a Account) -> LockedPair<'a> {
    debug_assert_ne!(
        source.id(),
        destination.id(),
        "an account cannot transfer to itself"
    );

    let (first, _) = acquisition_order(source.id(), destination.id());
    if first == source.id() {
        let source = source.lock();
        let destination = destination.lock();
        LockedPair { source, destination }
    } else {
        let destination = destination.lock();
        let source = source.lock();
        LockedPair { source, destination }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_symmetric() {
        let (a, b) = (AccountId::new(7), AccountId::new(3));
        assert_eq!(acquisition_order(a, b), acquisition_order(b, a));
        assert_eq!(acquisition_order(a, b).0, b);
    }

    #[test]
    fn test_pair_guards_follow_roles() {
        let one = Account::new(AccountId::new(1), 100, 10).unwrap();
        let two = Account::new(AccountId::new(2), 200, 20).unwrap();

        let pair = lock_pair(&two, &one);
        assert_eq!(pair.source.balance(), 200);
        assert_eq!(pair.destination.balance(), 100);
    }
}
