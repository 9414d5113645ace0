//! Orchestrator Engine
//!
//! Runs one complete transfer session:
//! - Account creation (validated configuration)
//! - Two transfer actors (A→B and B→A) on their own threads
//! - Deadline watchdog on the orchestrating thread
//! - Event logging (lifecycle events; completed transfers on request)
//!
//! # Architecture
//!
//! ```text
//! new(config)            validate, create accounts A(1) and B(2)
//! run()
//!   ├─ spawn actor A→B   loop: transfer, sleep(period) until non-success
//!   ├─ spawn actor B→A   loop: transfer, sleep(period) until non-success
//!   ├─ watchdog          wait(deadline); if still running → DeadlineExpired
//!   ├─ join both actors
//!   └─ summary           final balances, counts, reason
//! ```
//!
//! # Example
//!
//! ```rust
//! use bank_transfer_core::orchestrator::{AccountConfig, Orchestrator, SimulationConfig};
//! use bank_transfer_core::TerminationReason;
//!
//! let config = SimulationConfig {
//!     account_a: AccountConfig { opening_balance: 10_000, transfer_amount: 3_000 },
//!     account_b: AccountConfig { opening_balance: 0, transfer_amount: 4_000 },
//!     transfer_period_ms: 1,
//!     deadline_secs: 5,
//! };
//!
//! let orchestrator = Orchestrator::new(config).unwrap();
//! let summary = orchestrator.run();
//!
//! assert!(matches!(summary.reason, TerminationReason::InsufficientFunds { .. }));
//! assert_eq!(summary.total_balance(), 10_000);
//! ```

use crate::models::account::{Account, AccountError, AccountId};
use crate::models::event::{Event, EventLog};
use crate::models::money::format_amount;
use crate::orchestrator::actor::{ActorReport, Direction, TransferActor, TransferObserver};
use crate::orchestrator::checkpoint::{compute_config_hash, RunSummary};
use crate::orchestrator::termination::{Termination, TerminationReason};
use crate::settlement::TransferOutcome;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Identity of the first account
pub const ACCOUNT_A: AccountId = AccountId::new(1);

/// Identity of the second account
pub const ACCOUNT_B: AccountId = AccountId::new(2);

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete run configuration
///
/// Collected once, before any actor starts.
///
/// # Fields
///
/// * `account_a` / `account_b` - Opening state of each account
/// * `transfer_period_ms` - Wait between successful attempts, both directions
/// * `deadline_secs` - How long the watchdog lets the run go on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub account_a: AccountConfig,
    pub account_b: AccountConfig,
    pub transfer_period_ms: u64,
    pub deadline_secs: u64,
}

/// Per-account configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Opening balance (cents, may be negative)
    pub opening_balance: i64,

    /// Fixed amount moved out of this account per attempt (cents, positive)
    pub transfer_amount: i64,
}

impl SimulationConfig {
    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json)
            .map_err(|e| SimulationError::InvalidConfig(format!("Malformed config: {}", e)))
    }

    /// Check every value before any account is created
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (id, account) in [(ACCOUNT_A, &self.account_a), (ACCOUNT_B, &self.account_b)] {
            if account.transfer_amount <= 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "Transfer amount for account {} must be positive, got {}",
                    id,
                    format_amount(account.transfer_amount)
                )));
            }
        }

        self.account_a
            .opening_balance
            .checked_add(self.account_b.opening_balance)
            .ok_or_else(|| {
                SimulationError::InvalidConfig("Combined opening balance overflows".to_string())
            })?;

        Ok(())
    }

    pub fn transfer_period(&self) -> Duration {
        Duration::from_millis(self.transfer_period_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    /// Sum of both opening balances (cents)
    pub fn total_opening_balance(&self) -> i64 {
        self.account_a.opening_balance + self.account_b.opening_balance
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised before a run starts
///
/// A run itself cannot fail: both ways it can stop are reported through
/// [`TerminationReason`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Account error: {0}")]
    AccountError(#[from] AccountError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Owner of both accounts and the shared termination state
///
/// A run is single-use: once [`Orchestrator::run`] returns, the termination
/// state stays terminated and a second call stops immediately.
///
/// The event log keeps rejections, aborted attempts, actor stops and the
/// termination reason, a handful of events per run. Completed transfers are
/// only logged after [`Orchestrator::with_transfer_events`], since a short
/// period can complete millions of them per second.
#[derive(Debug)]
pub struct Orchestrator {
    config: SimulationConfig,
    config_hash: String,
    accounts: [Account; 2],
    termination: Termination,
    event_log: Mutex<EventLog>,
    log_transfers: bool,
}

impl Orchestrator {
    /// Create new orchestrator from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Accounts created, nothing running yet
    /// * `Err(SimulationError)` - Configuration validation failed
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let config_hash = compute_config_hash(&config)?;

        let accounts = [
            Account::new(
                ACCOUNT_A,
                config.account_a.opening_balance,
                config.account_a.transfer_amount,
            )?,
            Account::new(
                ACCOUNT_B,
                config.account_b.opening_balance,
                config.account_b.transfer_amount,
            )?,
        ];

        Ok(Self {
            config,
            config_hash,
            accounts,
            termination: Termination::new(),
            event_log: Mutex::new(EventLog::new()),
            log_transfers: false,
        })
    }

    /// Also log a `TransferCompleted` event for every completed transfer
    ///
    /// Memory grows with the number of transfers, so keep it for short runs.
    pub fn with_transfer_events(mut self) -> Self {
        self.log_transfers = true;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }

    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    /// Copy of everything logged so far
    pub fn event_log(&self) -> EventLog {
        self.event_log.lock().clone()
    }

    /// Run both actors and the deadline watchdog to completion
    ///
    /// Returns once both actors have stopped.
    pub fn run(&self) -> RunSummary {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("run", %run_id);
        let _entered = span.enter();
        let started = Instant::now();

        info!(
            deadline_secs = self.config.deadline_secs,
            transfer_period_ms = self.config.transfer_period_ms,
            "starting concurrent transfers"
        );

        let period = self.config.transfer_period();
        let forward = Direction::new(ACCOUNT_A, ACCOUNT_B);
        let actors = [
            TransferActor::new(forward, period),
            TransferActor::new(forward.reversed(), period),
        ];

        let (reason, reports) = thread::scope(|scope| {
            let handles: Vec<_> = actors
                .iter()
                .map(|actor| {
                    let span = span.clone();
                    scope.spawn(move || span.in_scope(|| self.run_actor(actor)))
                })
                .collect();

            let reason = self.watch_deadline();

            let reports: Vec<ActorReport> = handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect();

            (reason, reports)
        });

        for report in &reports {
            self.record(Event::ActorStopped {
                source: report.direction.source,
                destination: report.direction.destination,
                completed: report.completed,
            });
        }
        self.record(Event::Terminated { reason });

        let summary = RunSummary {
            run_id,
            config_hash: self.config_hash.clone(),
            accounts: self.accounts.iter().map(Account::snapshot).collect(),
            reason,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        info!(
            reason = %summary.reason,
            elapsed_ms = summary.elapsed_ms,
            total_balance = %format_amount(summary.total_balance()),
            "run finished"
        );

        summary
    }

    fn run_actor(&self, actor: &TransferActor) -> ActorReport {
        let direction = actor.direction();
        let (source, destination) = self.accounts_for(direction);
        actor.run(source, destination, &self.termination, self)
    }

    fn accounts_for(&self, direction: Direction) -> (&Account, &Account) {
        let [a, b] = &self.accounts;
        if direction.source == a.id() {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Deadline watchdog
    ///
    /// Waits for the configured deadline, returning early if the run has
    /// already terminated. Only this function ever records
    /// [`TerminationReason::DeadlineExpired`].
    fn watch_deadline(&self) -> TerminationReason {
        if let Some(reason) = self.termination.wait_timeout(self.config.deadline()) {
            return reason;
        }

        let reason = self
            .termination
            .terminate_or_current(TerminationReason::DeadlineExpired);
        if reason == TerminationReason::DeadlineExpired {
            info!(deadline_secs = self.config.deadline_secs, "global deadline expired");
        }
        reason
    }

    fn record(&self, event: Event) {
        self.event_log.lock().log(event);
    }
}

impl TransferObserver for Orchestrator {
    fn on_outcome(&self, direction: Direction, outcome: &TransferOutcome) {
        match outcome {
            TransferOutcome::Completed(record) => {
                info!(
                    source = %record.source,
                    destination = %record.destination,
                    amount = %format_amount(record.amount),
                    source_balance = %format_amount(record.source_balance),
                    destination_balance = %format_amount(record.destination_balance),
                    "transfer completed"
                );
                if self.log_transfers {
                    self.record(Event::from(record));
                }
            }
            TransferOutcome::InsufficientFunds {
                account,
                balance,
                required,
            } => {
                warn!(
                    account = %account,
                    balance = %format_amount(*balance),
                    required = %format_amount(*required),
                    "insufficient funds, terminating run"
                );
                self.record(Event::TransferRejected {
                    source: direction.source,
                    destination: direction.destination,
                    balance: *balance,
                    required: *required,
                });
            }
            TransferOutcome::Aborted => {
                debug!(
                    source = %direction.source,
                    destination = %direction.destination,
                    "attempt after termination, aborted"
                );
                self.record(Event::TransferAborted {
                    source: direction.source,
                    destination: direction.destination,
                });
            }
        }
    }
}
