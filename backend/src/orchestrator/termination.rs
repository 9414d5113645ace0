//! Termination state shared by the actors and the deadline watchdog
//!
//! The state is a single tagged value behind one mutex, so a reader can never
//! see the flag set without a complete reason. It moves one way only:
//! `Running` to `Terminated(reason)`. The first writer wins; later writers
//! leave the recorded reason alone.
//!
//! A condition variable is notified on the transition so the watchdog can
//! stop waiting as soon as the run ends for another reason.

use crate::models::account::AccountId;
use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Why a run stopped
///
/// Both variants are expected stopping conditions, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerminationReason {
    /// A transfer found its source unable to cover the transfer amount
    InsufficientFunds { account: AccountId },

    /// The watchdog deadline elapsed first
    DeadlineExpired,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::InsufficientFunds { account } => {
                write!(f, "Insufficient funds in Account {}", account)
            }
            TerminationReason::DeadlineExpired => write!(f, "Global deadline expired"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Terminated(TerminationReason),
}

/// Process-wide termination flag plus reason
///
/// # Example
/// ```
/// use bank_transfer_core::{AccountId, Termination, TerminationReason};
///
/// let termination = Termination::new();
/// assert!(!termination.is_terminated());
///
/// let funds = TerminationReason::InsufficientFunds { account: AccountId::new(2) };
/// assert!(termination.terminate(funds));
/// assert!(!termination.terminate(TerminationReason::DeadlineExpired));
///
/// assert_eq!(termination.reason(), Some(funds));
/// assert_eq!(funds.to_string(), "Insufficient funds in Account 2");
/// ```
#[derive(Debug)]
pub struct Termination {
    state: Mutex<State>,
    changed: Condvar,
}

impl Termination {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Running),
            changed: Condvar::new(),
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(*self.state.lock(), State::Terminated(_))
    }

    /// The recorded reason, or `None` while the run is still going
    pub fn reason(&self) -> Option<TerminationReason> {
        match *self.state.lock() {
            State::Running => None,
            State::Terminated(reason) => Some(reason),
        }
    }

    /// Move to `Terminated(reason)` unless already terminated
    ///
    /// Returns `true` if this call performed the transition.
    pub fn terminate(&self, reason: TerminationReason) -> bool {
        self.transition(reason).0
    }

    /// Like [`Termination::terminate`], but returns the reason that ends up
    /// recorded, whichever writer set it.
    pub fn terminate_or_current(&self, reason: TerminationReason) -> TerminationReason {
        self.transition(reason).1
    }

    fn transition(&self, reason: TerminationReason) -> (bool, TerminationReason) {
        let mut state = self.state.lock();
        if let State::Terminated(current) = *state {
            return (false, current);
        }
        *state = State::Terminated(reason);
        drop(state);

        self.changed.notify_all();
        (true, reason)
    }

    /// Block until terminated or until `timeout` elapses
    ///
    /// Returns the reason if the run terminated within the timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<TerminationReason> {
        // A timeout too large to represent means waiting for termination only
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.state.lock();
        loop {
            if let State::Terminated(reason) = *state {
                return Some(reason);
            }
            let Some(deadline) = deadline else {
                self.changed.wait(&mut state);
                continue;
            };
            // Spurious wakeups loop back to the check above
            if self.changed.wait_until(&mut state, deadline).timed_out() {
                return match *state {
                    State::Running => None,
                    State::Terminated(reason) => Some(reason),
                };
            }
        }
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        let funds = TerminationReason::InsufficientFunds {
            account: AccountId::new(1),
        };
        assert_eq!(funds.to_string(), "Insufficient funds in Account 1");
        assert_eq!(
            TerminationReason::DeadlineExpired.to_string(),
            "Global deadline expired"
        );
    }

    #[test]
    fn test_terminate_or_current_keeps_first_reason() {
        let termination = Termination::new();
        let funds = TerminationReason::InsufficientFunds {
            account: AccountId::new(2),
        };

        assert_eq!(termination.terminate_or_current(funds), funds);
        assert_eq!(
            termination.terminate_or_current(TerminationReason::DeadlineExpired),
            funds
        );
    }

    #[test]
    fn test_wait_times_out_while_running() {
        let termination = Termination::new();
        assert_eq!(termination.wait_timeout(Duration::from_millis(10)), None);
        assert!(!termination.is_terminated());
    }

    #[test]
    fn test_wait_returns_immediately_when_already_terminated() {
        let termination = Termination::new();
        termination.terminate(TerminationReason::DeadlineExpired);

        let started = Instant::now();
        assert_eq!(
            termination.wait_timeout(Duration::from_secs(60)),
            Some(TerminationReason::DeadlineExpired)
        );
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
