//! Bank transfer simulator command line
//!
//! Collects the run parameters, runs both transfer actors until one runs out
//! of funds or the deadline passes, then prints the final results. Either
//! stopping condition is a normal exit.

mod input;
mod output;

use anyhow::{Context, Result};
use bank_transfer_core::{parse_amount, Orchestrator, SimulationConfig};
use clap::Parser;
use input::{PartialConfig, Prompter};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "bank-transfer")]
#[command(
    version,
    about = "Two accounts, two concurrent transfer actors, one deadline",
    long_about = None
)]
struct Cli {
    /// Account 1 initial balance (decimal)
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    balance_a: Option<i64>,

    /// Account 1 transfer amount (decimal)
    #[arg(long, value_parser = parse_amount)]
    amount_a: Option<i64>,

    /// Account 2 initial balance (decimal)
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    balance_b: Option<i64>,

    /// Account 2 transfer amount (decimal)
    #[arg(long, value_parser = parse_amount)]
    amount_b: Option<i64>,

    /// Wait between successful transfers, in milliseconds
    #[arg(long)]
    period_ms: Option<u64>,

    /// Global deadline, in seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// JSON run config (amounts in cents); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "debug")]
    quiet: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn flags(&self) -> PartialConfig {
        PartialConfig {
            balance_a: self.balance_a,
            amount_a: self.amount_a,
            balance_b: self.balance_b,
            amount_b: self.amount_b,
            transfer_period_ms: self.period_ms,
            deadline_secs: self.deadline_secs,
        }
    }

    fn collect_config(&self) -> Result<SimulationConfig> {
        let from_file = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                PartialConfig::from(SimulationConfig::from_json(&json)?)
            }
            None => PartialConfig::default(),
        };

        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        self.flags().or(from_file).complete(&mut prompter)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins when set
    let default_filter = if cli.debug {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cli.collect_config()?;
    let orchestrator = Orchestrator::new(config)?;

    println!(
        "Starting concurrent transfers for a maximum of {} seconds...",
        orchestrator.config().deadline_secs
    );
    let summary = orchestrator.run();
    info!(run_id = %summary.run_id, "run complete");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", output::format_summary(&summary));
    }

    Ok(())
}
