//! Human-readable run summary

use bank_transfer_core::{format_amount, RunSummary, ACCOUNT_A, ACCOUNT_B};
use std::fmt::Write;

/// Final results block printed at shutdown
pub fn format_summary(summary: &RunSummary) -> String {
    let balance = |id| {
        summary
            .account(id)
            .map(|a| format_amount(a.balance))
            .unwrap_or_default()
    };

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "\n--- Final Results ---");
    let _ = writeln!(out, "Final Balance Account {}: {}", ACCOUNT_A, balance(ACCOUNT_A));
    let _ = writeln!(out, "Final Balance Account {}: {}", ACCOUNT_B, balance(ACCOUNT_B));
    let _ = writeln!(
        out,
        "Successful Transfers ({}->{}): {}",
        ACCOUNT_A,
        ACCOUNT_B,
        summary.successful_transfers(ACCOUNT_A)
    );
    let _ = writeln!(
        out,
        "Successful Transfers ({}->{}): {}",
        ACCOUNT_B,
        ACCOUNT_A,
        summary.successful_transfers(ACCOUNT_B)
    );
    let _ = writeln!(out, "Termination Reason: {}", summary.reason);
    let _ = write!(out, "---------------------");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bank_transfer_core::{AccountSnapshot, TerminationReason};
    use uuid::Uuid;

    fn create_summary(reason: TerminationReason, accounts: Vec<AccountSnapshot>) -> RunSummary {
        RunSummary {
            run_id: Uuid::nil(),
            config_hash: String::new(),
            accounts,
            reason,
            elapsed_ms: 0,
        }
    }

    #[test]
    fn test_format_summary() {
        let summary = create_summary(
            TerminationReason::InsufficientFunds { account: ACCOUNT_B },
            vec![
                AccountSnapshot {
                    id: ACCOUNT_A,
                    balance: 11_000,
                    transfer_amount: 3_000,
                    successful_transfers: 3,
                },
                AccountSnapshot {
                    id: ACCOUNT_B,
                    balance: 4_000,
                    transfer_amount: 4_000,
                    successful_transfers: 4,
                },
            ],
        );

        let text = format_summary(&summary);

        assert!(text.contains("Final Balance Account 1: 110.00"));
        assert!(text.contains("Final Balance Account 2: 40.00"));
        assert!(text.contains("Successful Transfers (1->2): 3"));
        assert!(text.contains("Successful Transfers (2->1): 4"));
        assert!(text.contains("Termination Reason: Insufficient funds in Account 2"));
    }

    #[test]
    fn test_format_summary_deadline() {
        let summary = create_summary(TerminationReason::DeadlineExpired, vec![]);
        assert!(format_summary(&summary).contains("Termination Reason: Global deadline expired"));
    }
}
