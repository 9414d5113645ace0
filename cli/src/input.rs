//! Operator input
//!
//! Run parameters come from three places, in priority order: command-line
//! flags, a JSON config file, and interactive prompts for whatever is still
//! missing. Everything is collected before any actor starts; a bad value
//! aborts the program right away.

use anyhow::{bail, Context, Result};
use bank_transfer_core::{parse_amount, AccountConfig, SimulationConfig};
use std::io::{BufRead, Write};

/// Run parameters, any of which may still be unknown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    pub balance_a: Option<i64>,
    pub amount_a: Option<i64>,
    pub balance_b: Option<i64>,
    pub amount_b: Option<i64>,
    pub transfer_period_ms: Option<u64>,
    pub deadline_secs: Option<u64>,
}

impl PartialConfig {
    /// Fill every unset field from `other`
    pub fn or(self, other: PartialConfig) -> Self {
        Self {
            balance_a: self.balance_a.or(other.balance_a),
            amount_a: self.amount_a.or(other.amount_a),
            balance_b: self.balance_b.or(other.balance_b),
            amount_b: self.amount_b.or(other.amount_b),
            transfer_period_ms: self.transfer_period_ms.or(other.transfer_period_ms),
            deadline_secs: self.deadline_secs.or(other.deadline_secs),
        }
    }

    /// Whether a prompt would be needed
    pub fn is_complete(&self) -> bool {
        self.balance_a.is_some()
            && self.amount_a.is_some()
            && self.balance_b.is_some()
            && self.amount_b.is_some()
            && self.transfer_period_ms.is_some()
            && self.deadline_secs.is_some()
    }

    /// Ask for each missing value, in the classic setup order
    pub fn complete<R: BufRead, W: Write>(
        self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<SimulationConfig> {
        if !self.is_complete() {
            prompter.banner("--- Bank Account Conundrum Setup ---")?;
        }

        let balance_a = fill(self.balance_a, || prompter.amount("Account 1 Initial Balance: "))?;
        let amount_a = fill(self.amount_a, || prompter.amount("Account 1 Transfer Amount: "))?;
        let balance_b = fill(self.balance_b, || prompter.amount("Account 2 Initial Balance: "))?;
        let amount_b = fill(self.amount_b, || prompter.amount("Account 2 Transfer Amount: "))?;
        let transfer_period_ms = fill(self.transfer_period_ms, || {
            prompter.integer("Transfer Period (ms): ")
        })?;
        let deadline_secs = fill(self.deadline_secs, || {
            prompter.integer("Global Deadline (seconds): ")
        })?;

        Ok(SimulationConfig {
            account_a: AccountConfig {
                opening_balance: balance_a,
                transfer_amount: amount_a,
            },
            account_b: AccountConfig {
                opening_balance: balance_b,
                transfer_amount: amount_b,
            },
            transfer_period_ms,
            deadline_secs,
        })
    }
}

impl From<SimulationConfig> for PartialConfig {
    fn from(config: SimulationConfig) -> Self {
        Self {
            balance_a: Some(config.account_a.opening_balance),
            amount_a: Some(config.account_a.transfer_amount),
            balance_b: Some(config.account_b.opening_balance),
            amount_b: Some(config.account_b.transfer_amount),
            transfer_period_ms: Some(config.transfer_period_ms),
            deadline_secs: Some(config.deadline_secs),
        }
    }
}

fn fill<T>(value: Option<T>, ask: impl FnOnce() -> Result<T>) -> Result<T> {
    match value {
        Some(value) => Ok(value),
        None => ask(),
    }
}

/// Prompt label without its trailing colon
fn field_name(label: &str) -> &str {
    label.trim_end_matches([':', ' '])
}

/// Line-oriented prompts over any reader/writer pair
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn banner(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn read_answer(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            bail!("input closed while waiting for '{}'", label.trim_end_matches([':', ' ']));
        }
        Ok(line.trim().to_string())
    }

    /// Decimal amount, returned in cents
    pub fn amount(&mut self, label: &str) -> Result<i64> {
        let answer = self.read_answer(label)?;
        parse_amount(&answer)
            .with_context(|| format!("invalid value for '{}'", field_name(label)))
    }

    /// Non-negative integer
    pub fn integer(&mut self, label: &str) -> Result<u64> {
        let answer = self.read_answer(label)?;
        answer
            .parse()
            .with_context(|| format!("invalid value for '{}': '{}'", field_name(label), answer))
    }
}
