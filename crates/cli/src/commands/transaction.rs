//! Deposit / withdraw commands

use anyhow::Result;
use minibank_core::{AccountNumber, BankAccount, CoreError};
use minibank_persistence::{AccountStore, Bank};
use rust_decimal::Decimal;
use std::io::Write;

/// Deposit `amount` into an account
pub fn deposit<S: AccountStore, W: Write>(
    bank: &mut Bank<S>,
    account_number: AccountNumber,
    amount: Decimal,
    out: &mut W,
) -> Result<()> {
    match bank.ledger_mut().deposit(account_number, amount) {
        Ok(balance) => {
            writeln!(out, "✅ Deposited {} into account {:02}", amount, account_number)?;
            writeln!(out, "   New balance: {}", balance)?;
        }
        Err(err) => report(out, err)?,
    }
    Ok(())
}

/// Withdraw `amount` from an account, reporting any excess-withdrawal fee
pub fn withdraw<S: AccountStore, W: Write>(
    bank: &mut Bank<S>,
    account_number: AccountNumber,
    amount: Decimal,
    out: &mut W,
) -> Result<()> {
    let ledger = bank.ledger_mut();
    let before = ledger.find_account(account_number).map(|a| a.balance());

    match ledger.withdraw(account_number, amount) {
        Ok(balance) => {
            writeln!(out, "✅ Withdrew {} from account {:02}", amount, account_number)?;
            let fee = before.map(|b| b - amount - balance).unwrap_or_default();
            if fee > Decimal::ZERO {
                writeln!(out, "   Excess withdrawal fee: {}", fee)?;
            }
            writeln!(out, "   New balance: {}", balance)?;
            if balance < Decimal::ZERO {
                writeln!(out, "   ⚠️  Account is overdrawn")?;
            }
        }
        Err(err) => report(out, err)?,
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, err: CoreError) -> Result<()> {
    writeln!(out, "❌ {}", err)?;
    Ok(())
}
