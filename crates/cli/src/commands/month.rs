//! Month-end processing command

use anyhow::Result;
use minibank_persistence::{AccountStore, Bank};
use std::io::Write;

/// Apply month-end processing to every account
pub fn process_end_month<S: AccountStore, W: Write>(
    bank: &mut Bank<S>,
    out: &mut W,
) -> Result<()> {
    let summary = bank.ledger_mut().process_end_month();

    writeln!(
        out,
        "✅ Month-end processed for {} account(s)",
        summary.accounts_processed
    )?;
    writeln!(out, "   Interest credited: {:.2}", summary.interest_credited)?;
    if summary.accounts_skipped > 0 {
        writeln!(
            out,
            "⚠️  Skipped {} account(s) whose interest would overflow",
            summary.accounts_skipped
        )?;
    }
    Ok(())
}
