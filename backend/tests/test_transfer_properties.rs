//! Property tests for the transfer operation
//!
//! Invariants checked:
//! - Completed transfers move exactly the source's amount and bump only the
//!   source's counter
//! - Total balance never changes, sequentially or under concurrency
//! - The funds check is `balance >= amount`

use bank_transfer_core::{transfer, Account, AccountId, Termination, TransferOutcome};
use proptest::prelude::*;
use std::thread;

fn create_accounts(
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

proptest! {
    #[test]
    fn prop_completed_transfer_postconditions(
        balance_a in -1_000_000i64..1_000_000,
        amount_a in 1i64..100_000,
        balance_b in -1_000_000i64..1_000_000,
        amount_b in 1i64..100_000,
        forward in any::<bool>(),
    ) {
        let (a, b) = create_accounts(balance_a, amount_a, balance_b, amount_b);
        let (source, destination) = if forward { (&a, &b) } else { (&b, &a) };
        let before_source = source.snapshot();
        let before_destination = destination.snapshot();
        let termination = Termination::new();

        let outcome = transfer(source, destination, &termination);
        let after_source = source.snapshot();
        let after_destination = destination.snapshot();

        if before_source.balance >= before_source.transfer_amount {
            prop_assert!(outcome.is_success());
            let amount = before_source.transfer_amount;
            prop_assert_eq!(after_source.balance, before_source.balance - amount);
            prop_assert_eq!(after_destination.balance, before_destination.balance + amount);
            prop_assert_eq!(
                after_source.successful_transfers,
                before_source.successful_transfers + 1
            );
            prop_assert_eq!(
                after_destination.successful_transfers,
                before_destination.successful_transfers
            );
            prop_assert!(!termination.is_terminated());
        } else {
            let is_insufficient = matches!(outcome, TransferOutcome::InsufficientFunds { .. });
            prop_assert!(is_insufficient);
            prop_assert_eq!(after_source, before_source);
            prop_assert_eq!(after_destination, before_destination);
            prop_assert!(termination.is_terminated());
        }
    }

    #[test]
    fn prop_sequential_transfers_conserve_total(
        balance_a in 0i64..500_000,
        amount_a in 1i64..50_000,
        balance_b in 0i64..500_000,
        amount_b in 1i64..50_000,
        directions in proptest::collection::vec(any::<bool>(), 1..200),
    ) {
        let (a, b) = create_accounts(balance_a, amount_a, balance_b, amount_b);
        let termination = Termination::new();
        let total = balance_a + balance_b;

        for forward in directions {
            let outcome = if forward {
                transfer(&a, &b, &termination)
            } else {
                transfer(&b, &a, &termination)
            };
            prop_assert_eq!(a.snapshot().balance + b.snapshot().balance, total);
            if !outcome.is_success() {
                break;
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_concurrent_transfers_conserve_total(
        balance_a in 0i64..200_000,
        amount_a in 1i64..5_000,
        balance_b in 0i64..200_000,
        amount_b in 1i64..5_000,
    ) {
        let (a, b) = create_accounts(balance_a, amount_a, balance_b, amount_b);
        let termination = Termination::new();

        let completed: u64 = thread::scope(|scope| {
            let forward = scope.spawn(|| {
                let mut n = 0u64;
                while transfer(&a, &b, &termination).is_success() && n < 5_000 {
                    n += 1;
                }
                n
            });
            let backward = scope.spawn(|| {
                let mut n = 0u64;
                while transfer(&b, &a, &termination).is_success() && n < 5_000 {
                    n += 1;
                }
                n
            });
            forward.join().unwrap() + backward.join().unwrap()
        });

        let (a, b) = (a.snapshot(), b.snapshot());
        prop_assert_eq!(a.balance + b.balance, balance_a + balance_b);
        prop_assert!(a.successful_transfers + b.successful_transfers >= completed);
    }
}
