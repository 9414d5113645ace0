//! Transfer actor
//!
//! Both transfer directions run the same loop, parameterised by a
//! [`Direction`]:
//!
//! ```text
//! RUNNING ── transfer() ──┬─ Completed → sleep(period) → RUNNING
//!                         └─ otherwise → STOPPED
//! ```
//!
//! The first attempt is immediate. The actor only learns about termination
//! through the outcome of its next attempt, so an actor that is asleep when
//! the run terminates wakes up, makes one more (aborted) attempt, then stops.

use crate::models::account::{Account, AccountId};
use crate::orchestrator::termination::Termination;
use crate::settlement::{transfer, TransferOutcome, TransferRecord};
use std::thread;
use std::time::Duration;

/// Fixed (source, destination) pair of one actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub source: AccountId,
    pub destination: AccountId,
}

impl Direction {
    pub fn new(source: AccountId, destination: AccountId) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// The same pair, the other way round
    pub fn reversed(self) -> Self {
        Self::new(self.destination, self.source)
    }
}

/// Receives every attempt outcome an actor produces
///
/// Called after the account locks have been released.
pub trait TransferObserver: Sync {
    fn on_outcome(&self, direction: Direction, outcome: &TransferOutcome);
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TransferObserver for NoopObserver {
    fn on_outcome(&self, _direction: Direction, _outcome: &TransferOutcome) {}
}

/// What an actor did before it stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorReport {
    pub direction: Direction,

    /// Transfers this actor completed
    pub completed: u64,

    /// The outcome that ended the loop (never `Completed`)
    pub exit: TransferOutcome,

    /// Last completed transfer, if any
    pub last_transfer: Option<TransferRecord>,
}

/// One long-running transfer loop
#[derive(Debug, Clone, Copy)]
pub struct TransferActor {
    direction: Direction,
    period: Duration,
}

impl TransferActor {
    pub fn new(direction: Direction, period: Duration) -> Self {
        Self { direction, period }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Run until an attempt does not complete
    ///
    /// `source` and `destination` must match the actor's [`Direction`].
    pub fn run(
        &self,
        source: &Account,
        destination: &Account,
        termination: &Termination,
        observer: &dyn TransferObserver,
    ) -> ActorReport {
        debug_assert_eq!(source.id(), self.direction.source);
        debug_assert_eq!(destination.id(), self.direction.destination);

        let mut completed = 0;
        let mut last_transfer = None;

        loop {
            let outcome = transfer(source, destination, termination);
            observer.on_outcome(self.direction, &outcome);

            match outcome {
                TransferOutcome::Completed(record) => {
                    completed += 1;
                    last_transfer = Some(record);
                    thread::sleep(self.period);
                }
                exit => {
                    tracing::info!(
                        source = %self.direction.source,
                        destination = %self.direction.destination,
                        completed,
                        "transfer actor stopped"
                    );
                    return ActorReport {
                        direction: self.direction,
                        completed,
                        exit,
                        last_transfer,
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::termination::TerminationReason;

    #[test]
    fn test_direction_reversed() {
        let forward = Direction::new(AccountId::new(1), AccountId::new(2));
        let back = forward.reversed();
        assert_eq!(back.source, AccountId::new(2));
        assert_eq!(back.destination, AccountId::new(1));
        assert_eq!(back.reversed(), forward);
    }

    #[test]
    fn test_actor_drains_source_then_stops() {
        let a = Account::new(AccountId::new(1), 10_000, 3_000).unwrap();
        let b = Account::new(AccountId::new(2), 0, 1_000).unwrap();
        let termination = Termination::new();
        let actor = TransferActor::new(Direction::new(a.id(), b.id()), Duration::ZERO);

        let report = actor.run(&a, &b, &termination, &NoopObserver);

        assert_eq!(report.completed, 3);
        assert_eq!(
            report.exit,
            TransferOutcome::InsufficientFunds {
                account: a.id(),
                balance: 1_000,
                required: 3_000,
            }
        );
        assert_eq!(report.last_transfer.map(|r| r.source_balance), Some(1_000));
        assert_eq!(
            termination.reason(),
            Some(TerminationReason::InsufficientFunds { account: a.id() })
        );
    }
}
