//! Checkpoint - end-of-run summary
//!
//! Captures the final state of a run once both actors have stopped, in a
//! form that can be printed, serialized, or compared across runs.
//!
//! # Critical Invariants
//!
//! - **Balance Conservation**: `total_balance()` equals the sum of the
//!   opening balances of the config the run was started with
//! - **Config Matching**: `config_hash` identifies that config

use crate::models::account::{AccountId, AccountSnapshot};
use crate::orchestrator::termination::TerminationReason;
use crate::orchestrator::{SimulationConfig, SimulationError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

// ============================================================================
// Summary Structures
// ============================================================================

/// Final state of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique id of this run (also attached to its log lines)
    pub run_id: Uuid,

    /// SHA256 of the canonical JSON config the run was started with
    pub config_hash: String,

    /// Final account states, account A first
    pub accounts: Vec<AccountSnapshot>,

    /// Why the run stopped
    pub reason: TerminationReason,

    /// Wall-clock time from start until both actors stopped
    pub elapsed_ms: u64,
}

impl RunSummary {
    /// Final state of one account
    pub fn account(&self, id: AccountId) -> Option<&AccountSnapshot> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Sum of all final balances (cents)
    pub fn total_balance(&self) -> i64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    /// Completed transfers out of `source`
    pub fn successful_transfers(&self, source: AccountId) -> u64 {
        self.account(source)
            .map(|a| a.successful_transfers)
            .unwrap_or(0)
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute SHA256 hash of a run config, as lowercase hex
///
/// `SimulationConfig` has a fixed field order, so its compact JSON form is
/// already canonical.
pub fn compute_config_hash(config: &SimulationConfig) -> Result<String, SimulationError> {
    let json = serde_json::to_vec(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    Ok(format!("{:x}", Sha256::digest(&json)))
}
