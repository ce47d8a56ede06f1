//! # Minibank Core
//!
//! Core domain types cho Minibank: tài khoản thanh toán / tiết kiệm, Ledger
//! và định dạng record để lưu file.
//!
//! ## Usage
//!
//! ```
//! use minibank_core::{BankAccount, Ledger};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::new();
//! let number = ledger.open_checking("Jane Doe").unwrap();
//! ledger.deposit(number, Decimal::from(100)).unwrap();
//! ledger.process_end_month();
//!
//! let account = ledger.find_account(number).unwrap();
//! assert_eq!(account.balance(), Decimal::from(100));
//! ```

pub mod account;
pub mod checking;
pub mod error;
pub mod ledger;
pub mod record;
pub mod savings;

pub use account::{normalize_name, Account, AccountKind, AccountNumber, BankAccount};
pub use checking::{CheckingAccount, EXCESS_WITHDRAWAL_FEE, MAXIMUM_FREE_WITHDRAWALS};
pub use error::{CoreError, CoreResult};
pub use ledger::{Ledger, MonthEndSummary};
pub use record::parse_record;
pub use savings::SavingsAccount;
