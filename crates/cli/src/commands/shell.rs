//! Interactive shell
//!
//! Menu-driven session over a [`Console`]. Prompting lives here; the ledger
//! only ever sees account numbers and amounts.

use anyhow::Result;
use minibank_core::{AccountKind, AccountNumber, BankAccount};
use minibank_persistence::{AccountStore, Bank};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

const MENU: &str =
    "Commands: (d)eposit (w)ithdraw (b)alance (c)hecking (s)avings (m)onth-end (l)ist (q)uit";

/// User-facing input/output used by the shell.
pub trait Console {
    /// Prompt and read one line. `None` once input is exhausted.
    fn request_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn report_message(&mut self, message: &str) -> Result<()>;

    /// Prompt for an account number. Invalid input is reported and yields `None`.
    fn request_account_number(&mut self) -> Result<Option<AccountNumber>> {
        self.request_value("Enter account number: ", "account number")
    }

    /// Prompt for an amount. Invalid input is reported and yields `None`.
    fn request_amount(&mut self) -> Result<Option<Decimal>> {
        self.request_value("Enter amount: ", "amount")
    }

    fn request_value<T: FromStr>(&mut self, prompt: &str, what: &str) -> Result<Option<T>> {
        let Some(line) = self.request_line(prompt)? else {
            return Ok(None);
        };
        match line.trim().parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                self.report_message(&format!("Invalid {}: {:?}", what, line.trim()))?;
                Ok(None)
            }
        }
    }
}

/// Console over any line reader and writer (stdin/stdout in the binary).
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn request_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn report_message(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// Run the menu loop until `q` or end of input.
pub fn run<S: AccountStore, C: Console>(bank: &mut Bank<S>, console: &mut C) -> Result<()> {
    console.report_message(MENU)?;

    while let Some(choice) = console.request_line("> ")? {
        match choice.trim().to_lowercase().as_str() {
            "" => continue,
            "q" | "quit" => break,
            "d" | "deposit" => deposit(bank, console)?,
            "w" | "withdraw" => withdraw(bank, console)?,
            "b" | "balance" => balance(bank, console)?,
            "c" | "checking" => open_account(bank, console, None)?,
            "s" | "savings" => {
                let Some(rate) =
                    console.request_value::<Decimal>("Enter monthly interest rate: ", "rate")?
                else {
                    continue;
                };
                open_account(bank, console, Some(rate))?
            }
            "m" | "month-end" => {
                let summary = bank.ledger_mut().process_end_month();
                console.report_message(&format!(
                    "Month-end processed for {} account(s), interest credited: {:.2}",
                    summary.accounts_processed, summary.interest_credited
                ))?;
                if summary.accounts_skipped > 0 {
                    console.report_message(&format!(
                        "Skipped {} account(s) whose interest would overflow",
                        summary.accounts_skipped
                    ))?;
                }
            }
            "l" | "list" => {
                for account in bank.ledger().accounts() {
                    console.report_message(&account.to_string())?;
                }
            }
            other => {
                console.report_message(&format!("Unknown command: {}", other))?;
                console.report_message(MENU)?;
            }
        }
    }

    Ok(())
}

fn deposit<S: AccountStore, C: Console>(bank: &mut Bank<S>, console: &mut C) -> Result<()> {
    let Some(number) = console.request_account_number()? else {
        return Ok(());
    };
    let Some(account) = bank.ledger_mut().find_account_mut(number) else {
        return console.report_message(&format!("Account {:02} not found", number));
    };
    let Some(amount) = console.request_amount()? else {
        return Ok(());
    };

    match account.deposit(amount) {
        Ok(balance) => console.report_message(&format!("Balance: {}", balance)),
        Err(err) => console.report_message(&err.to_string()),
    }
}

fn withdraw<S: AccountStore, C: Console>(bank: &mut Bank<S>, console: &mut C) -> Result<()> {
    let Some(number) = console.request_account_number()? else {
        return Ok(());
    };
    let Some(account) = bank.ledger_mut().find_account_mut(number) else {
        return console.report_message(&format!("Account {:02} not found", number));
    };
    let Some(amount) = console.request_amount()? else {
        return Ok(());
    };

    match account.withdraw(amount) {
        Ok(balance) => console.report_message(&format!("Balance: {}", balance)),
        Err(err) => console.report_message(&err.to_string()),
    }
}

fn balance<S: AccountStore, C: Console>(bank: &Bank<S>, console: &mut C) -> Result<()> {
    let Some(number) = console.request_account_number()? else {
        return Ok(());
    };
    match bank.ledger().find_account(number) {
        Some(account) => console.report_message(&account.to_string()),
        None => console.report_message(&format!("Account {:02} not found", number)),
    }
}

fn open_account<S: AccountStore, C: Console>(
    bank: &mut Bank<S>,
    console: &mut C,
    interest_rate: Option<Decimal>,
) -> Result<()> {
    let Some(name) = console.request_line("Enter owner name: ")? else {
        return Ok(());
    };
    let kind = match interest_rate {
        Some(interest_rate) => AccountKind::Savings { interest_rate },
        None => AccountKind::Checking,
    };

    match bank.ledger_mut().create_account(kind, name) {
        Ok(number) => console.report_message(&format!("Opened {} account {:02}", kind, number)),
        Err(err) => console.report_message(&err.to_string()),
    }
}
