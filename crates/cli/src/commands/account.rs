//! Account management commands

use anyhow::{Context, Result};
use minibank_core::{Account, AccountNumber, BankAccount};
use minibank_persistence::{AccountStore, Bank};
use rust_decimal::Decimal;
use std::io::Write;

use crate::{AccountAction, AccountKindArg};

/// Handle account subcommands
pub fn handle<S: AccountStore, W: Write>(
    bank: &mut Bank<S>,
    action: AccountAction,
    out: &mut W,
) -> Result<()> {
    match action {
        AccountAction::Create { kind, name, rate } => {
            create_account(bank, kind, &name, rate, out)?;
        }
        AccountAction::List { json } => {
            if json {
                list_accounts_json(bank, out)?;
            } else {
                list_accounts(bank, out)?;
            }
        }
        AccountAction::Show { account_number } => {
            show_account(bank, account_number, out)?;
        }
    }
    Ok(())
}

/// Create a new account
fn create_account<S: AccountStore, W: Write>(
    bank: &mut Bank<S>,
    kind: AccountKindArg,
    name: &str,
    rate: Option<Decimal>,
    out: &mut W,
) -> Result<()> {
    let core_kind = kind.to_core_kind(rate)?;
    let number = bank
        .ledger_mut()
        .create_account(core_kind, name)
        .context("Failed to open account")?;
    let account = bank
        .ledger()
        .find_account(number)
        .context("Opened account is missing from the ledger")?;

    writeln!(out, "✅ Created {} account:", core_kind)?;
    writeln!(out, "   Account number: {:02}", number)?;
    writeln!(out, "   Name:           {}", account.name())?;
    if let Some(savings) = account.as_savings() {
        writeln!(out, "   Interest rate:  {}", savings.interest_rate())?;
    }
    Ok(())
}

/// List accounts as a plain table
fn list_accounts<S: AccountStore, W: Write>(bank: &Bank<S>, out: &mut W) -> Result<()> {
    let accounts = bank.ledger().accounts();
    if accounts.is_empty() {
        writeln!(out, "No accounts found.")?;
        return Ok(());
    }

    writeln!(out, "{:<6} {:<10} {:>14}  {}", "NUMBER", "TYPE", "BALANCE", "NAME")?;
    writeln!(out, "{}", "-".repeat(50))?;
    for account in accounts {
        writeln!(
            out,
            "{:<6} {:<10} {:>14}  {}",
            format!("{:02}", account.account_number()),
            account.kind().as_str(),
            format!("{:.2}", account.balance()),
            account.name()
        )?;
    }
    writeln!(out, "\nTotal: {} account(s)", accounts.len())?;
    Ok(())
}

/// List accounts as JSON
fn list_accounts_json<S: AccountStore, W: Write>(bank: &Bank<S>, out: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(bank.ledger().accounts())
        .context("Failed to serialize accounts")?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Show one account
fn show_account<S: AccountStore, W: Write>(
    bank: &Bank<S>,
    account_number: AccountNumber,
    out: &mut W,
) -> Result<()> {
    let Some(account) = bank.ledger().find_account(account_number) else {
        writeln!(out, "❌ Account {:02} not found", account_number)?;
        return Ok(());
    };

    writeln!(out, "📋 Account {:02}", account.account_number())?;
    writeln!(out, "   Type:    {}", account.kind())?;
    writeln!(out, "   Name:    {}", account.name())?;
    writeln!(out, "   Balance: {}", account.balance())?;
    match account {
        Account::Checking(checking) => {
            writeln!(out, "   Withdrawals this month: {}", checking.withdrawal_count())?;
        }
        Account::Savings(savings) => {
            writeln!(out, "   Interest rate:          {}", savings.interest_rate())?;
            writeln!(
                out,
                "   Minimum balance (month): {}",
                savings.minimum_balance_of_month()
            )?;
        }
    }
    Ok(())
}
