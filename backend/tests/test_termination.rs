//! Termination state tests
//!
//! The reason is written once, by whichever writer gets there first, and is
//! never torn, even with many concurrent writers.

use bank_transfer_core::{AccountId, Termination, TerminationReason};
use std::sync::Barrier;
use std::thread;
use std::time::{Duration, Instant};

const VALID_REASONS: [&str; 3] = [
    "Insufficient funds in Account 1",
    "Insufficient funds in Account 2",
    "Global deadline expired",
];

#[test]
fn test_starts_running() {
    let termination = Termination::new();
    assert!(!termination.is_terminated());
    assert_eq!(termination.reason(), None);
}

#[test]
fn test_first_writer_wins() {
    let termination = Termination::new();

    assert!(termination.terminate(TerminationReason::DeadlineExpired));
    assert!(!termination.terminate(TerminationReason::InsufficientFunds {
        account: AccountId::new(1)
    }));

    assert!(termination.is_terminated());
    assert_eq!(
        termination.reason(),
        Some(TerminationReason::DeadlineExpired)
    );
}

#[test]
fn test_racing_writers_record_exactly_one_reason() {
    for _ in 0..200 {
        let termination = Termination::new();
        let barrier = Barrier::new(3);
        let reasons = [
            TerminationReason::InsufficientFunds {
                account: AccountId::new(1),
            },
            TerminationReason::InsufficientFunds {
                account: AccountId::new(2),
            },
            TerminationReason::DeadlineExpired,
        ];

        let winners: usize = thread::scope(|scope| {
            let handles: Vec<_> = reasons
                .iter()
                .map(|reason| {
                    let termination = &termination;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        termination.terminate(*reason)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| usize::from(h.join().unwrap()))
                .sum()
        });

        assert_eq!(winners, 1);
        let reason = termination.reason().unwrap().to_string();
        assert!(VALID_REASONS.contains(&reason.as_str()), "bad reason {:?}", reason);
    }
}

#[test]
fn test_wait_wakes_on_termination() {
    let termination = Termination::new();
    let started = Instant::now();

    let reason = thread::scope(|scope| {
        scope.spawn(|| {
            thread::sleep(Duration::from_millis(50));
            termination.terminate(TerminationReason::InsufficientFunds {
                account: AccountId::new(2),
            });
        });
        termination.wait_timeout(Duration::from_secs(30))
    });

    assert_eq!(
        reason,
        Some(TerminationReason::InsufficientFunds {
            account: AccountId::new(2)
        })
    );
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_wait_on_unrepresentable_timeout_still_wakes() {
    let termination = Termination::new();

    let reason = thread::scope(|scope| {
        scope.spawn(|| {
            thread::sleep(Duration::from_millis(20));
            termination.terminate(TerminationReason::DeadlineExpired);
        });
        termination.wait_timeout(Duration::MAX)
    });

    assert_eq!(reason, Some(TerminationReason::DeadlineExpired));
}
