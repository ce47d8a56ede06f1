//! # Minibank Persistence
//!
//! Persistence layer cho Minibank - lưu tài khoản dạng flat text file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use minibank_persistence::{Bank, FlatFileStore};
//!
//! let mut bank = Bank::open(FlatFileStore::new("bank.dat"));
//! for warning in bank.warnings() {
//!     eprintln!("{}", warning);
//! }
//!
//! let number = bank.ledger_mut().open_checking("Jane Doe").unwrap();
//! bank.ledger_mut().process_end_month();
//! bank.save().unwrap();
//! # let _ = number;
//! ```

pub mod bank;
pub mod error;
pub mod store;

pub use bank::Bank;
pub use error::{PersistenceError, PersistenceResult};
pub use store::{AccountStore, FlatFileStore, LoadedLine, MemoryStore};
