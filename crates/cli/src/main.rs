//! Minibank CLI - account operations from the command line
//!
//! Usage:
//! ```bash
//! minibank account create --kind checking --name "Jane Doe"
//! minibank account create --kind savings --name "John Smith" --rate 0.05
//! minibank deposit 1 100
//! minibank withdraw 1 10
//! minibank month-end
//! minibank account list --json
//! minibank --data-file other.dat shell
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use minibank_core::{AccountKind, AccountNumber};
use minibank_persistence::{AccountStore, Bank, FlatFileStore};
use rust_decimal::Decimal;
use std::io;
use std::path::{Path, PathBuf};
use tracing::Level;

mod commands;

use commands::{account, month, shell, transaction};

/// Minibank - checking and savings accounts kept in a flat file
#[derive(Parser)]
#[command(name = "minibank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Account data file path
    #[arg(long, default_value = "bank.dat", global = true)]
    pub data_file: PathBuf,

    /// Log every account transition
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Deposit funds to an account
    Deposit {
        /// Account number (e.g., 1)
        account_number: AccountNumber,
        /// Amount to deposit
        amount: Decimal,
    },

    /// Withdraw funds from an account
    Withdraw {
        /// Account number
        account_number: AccountNumber,
        /// Amount to withdraw
        amount: Decimal,
    },

    /// Run month-end processing on every account
    MonthEnd,

    /// Interactive session
    Shell,
}

impl Commands {
    /// Whether the command changes the ledger and needs a save afterwards
    pub fn mutates(&self) -> bool {
        match self {
            Commands::Account { action } => matches!(action, AccountAction::Create { .. }),
            Commands::Deposit { .. }
            | Commands::Withdraw { .. }
            | Commands::MonthEnd
            | Commands::Shell => true,
        }
    }
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Open a new account
    Create {
        /// Account type
        #[arg(long, short)]
        kind: AccountKindArg,
        /// Owner name
        #[arg(long, short)]
        name: String,
        /// Monthly interest rate as a fraction (savings only, e.g. 0.02)
        #[arg(long, short, required_if_eq("kind", "savings"))]
        rate: Option<Decimal>,
    },
    /// List all accounts
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show account details
    Show {
        /// Account number
        account_number: AccountNumber,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AccountKindArg {
    Checking,
    Savings,
}

impl AccountKindArg {
    pub fn to_core_kind(&self, rate: Option<Decimal>) -> Result<AccountKind> {
        match self {
            AccountKindArg::Checking => Ok(AccountKind::Checking),
            AccountKindArg::Savings => {
                let interest_rate =
                    rate.context("--rate is required when opening a savings account")?;
                Ok(AccountKind::Savings { interest_rate })
            }
        }
    }
}

/// Refuse mutating commands when the data file exists but could not be read,
/// so the following save cannot replace it with a partial ledger.
fn ensure_writable<S: AccountStore>(bank: &Bank<S>, command: &Commands, path: &Path) -> Result<()> {
    if command.mutates() && !bank.can_save() {
        bail!("{:?} could not be read; refusing to modify it", path);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut bank = Bank::open(FlatFileStore::new(&cli.data_file));
    ensure_writable(&bank, &cli.command, &cli.data_file)?;
    let mutates = cli.command.mutates();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Account { action } => {
            account::handle(&mut bank, action, &mut out)?;
        }

        Commands::Deposit {
            account_number,
            amount,
        } => {
            transaction::deposit(&mut bank, account_number, amount, &mut out)?;
        }

        Commands::Withdraw {
            account_number,
            amount,
        } => {
            transaction::withdraw(&mut bank, account_number, amount, &mut out)?;
        }

        Commands::MonthEnd => {
            month::process_end_month(&mut bank, &mut out)?;
        }

        Commands::Shell => {
            let mut console = shell::LineConsole::new(io::stdin().lock(), &mut out);
            shell::run(&mut bank, &mut console)?;
        }
    }

    if mutates {
        bank.save()
            .with_context(|| format!("Failed to save accounts to {:?}", cli.data_file))?;
    }

    Ok(())
}
