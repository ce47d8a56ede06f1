//! CLI command handlers
//!
//! Every handler works on an already opened [`Bank`](minibank_persistence::Bank)
//! and writes its user-facing messages to `out`; saving is left to the caller.

pub mod account;
pub mod month;
pub mod shell;
pub mod transaction;
