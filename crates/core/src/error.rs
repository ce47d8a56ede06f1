//! # Error Module
//!
//! Định nghĩa các domain errors cho Minibank sử dụng thiserror.

use crate::account::AccountNumber;
use thiserror::Error;

/// Core domain errors.
///
/// Các lỗi nghiệp vụ cốt lõi, không liên quan đến infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // === Money errors ===
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    // === Account errors ===
    #[error("Account not found: {0:02}")]
    AccountNotFound(AccountNumber),

    #[error("Account already exists: {0:02}")]
    DuplicateAccount(AccountNumber),

    #[error("No account numbers left to assign")]
    AccountNumbersExhausted,

    // === Record errors ===
    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },
}

/// Result type alias với CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Tạo MalformedRecord error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }

    /// Kiểm tra có phải lỗi not found không
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::AccountNotFound(_))
    }

    /// Kiểm tra có phải lỗi tràn số không
    pub fn is_overflow(&self) -> bool {
        matches!(self, CoreError::AmountOverflow(_))
    }

    /// Kiểm tra có phải lỗi record không đọc được không
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, CoreError::MalformedRecord { .. })
    }
}
