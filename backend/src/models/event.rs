//! Event logging for run auditing.
//!
//! Captures transfer attempt outcomes and every lifecycle change of a run.
//! Events let tests check what happened after the fact:
//! - Auditing (replay completed transfers against the opening balances)
//! - Debugging (which actor stopped, and on which outcome)
//!
//! Events from the two actors interleave in the order they were logged,
//! which respects causal order but nothing more.
//!
//! # Example
//!
//! ```rust
//! use bank_transfer_core::AccountId;
//! use bank_transfer_core::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::TransferAborted {
//!     source: AccountId::new(1),
//!     destination: AccountId::new(2),
//! });
//!
//! assert_eq!(log.events_of_type("TransferAborted").len(), 1);
//! ```

use crate::models::account::AccountId;
use crate::orchestrator::termination::TerminationReason;
use crate::settlement::TransferRecord;
use serde::{Deserialize, Serialize};

/// Run event capturing a state change or attempt outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum Event {
    /// Funds moved from source to destination
    TransferCompleted {
        source: AccountId,
        destination: AccountId,
        amount: i64,
        source_balance: i64,
        destination_balance: i64,
    },

    /// Source could not cover its transfer amount
    TransferRejected {
        source: AccountId,
        destination: AccountId,
        balance: i64,
        required: i64,
    },

    /// Attempt found the run already terminated
    TransferAborted {
        source: AccountId,
        destination: AccountId,
    },

    /// The run's termination reason was recorded
    Terminated { reason: TerminationReason },

    /// An actor left its loop
    ActorStopped {
        source: AccountId,
        destination: AccountId,
        completed: u64,
    },
}

impl Event {
    /// Variant name, as used by [`EventLog::events_of_type`]
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::TransferCompleted { .. } => "TransferCompleted",
            Event::TransferRejected { .. } => "TransferRejected",
            Event::TransferAborted { .. } => "TransferAborted",
            Event::Terminated { .. } => "Terminated",
            Event::ActorStopped { .. } => "ActorStopped",
        }
    }

    /// Source account of the transfer direction this event belongs to
    pub fn source(&self) -> Option<AccountId> {
        match self {
            Event::TransferCompleted { source, .. }
            | Event::TransferRejected { source, .. }
            | Event::TransferAborted { source, .. }
            | Event::ActorStopped { source, .. } => Some(*source),
            Event::Terminated { .. } => None,
        }
    }

    /// Whether the event touches `account` as source or destination
    pub fn involves(&self, account: AccountId) -> bool {
        match self {
            Event::TransferCompleted {
                source, destination, ..
            }
            | Event::TransferRejected {
                source, destination, ..
            }
            | Event::TransferAborted { source, destination }
            | Event::ActorStopped {
                source, destination, ..
            } => *source == account || *destination == account,
            Event::Terminated { reason } => matches!(
                reason,
                TerminationReason::InsufficientFunds { account: a } if *a == account
            ),
        }
    }
}

impl From<&TransferRecord> for Event {
    fn from(record: &TransferRecord) -> Self {
        Event::TransferCompleted {
            source: record.source,
            destination: record.destination,
            amount: record.amount,
            source_balance: record.source_balance,
            destination_balance: record.destination_balance,
        }
    }
}

/// Event log for a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events of one transfer direction, identified by its source
    pub fn events_from(&self, source: AccountId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.source() == Some(source))
            .collect()
    }

    /// Get events touching a specific account
    pub fn events_for_account(&self, account: AccountId) -> Vec<&Event> {
        self.events.iter().filter(|e| e.involves(account)).collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
