//! # Account Module
//!
//! Định nghĩa Account - tài khoản của khách hàng, gồm hai loại:
//! Checking (thanh toán) và Savings (tiết kiệm).
//!
//! Mỗi loại tự giữ state riêng của mình; phần chung (số tài khoản, tên chủ,
//! số dư) nằm trong [`AccountBase`].

use crate::checking::CheckingAccount;
use crate::error::{CoreError, CoreResult};
use crate::savings::SavingsAccount;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Số tài khoản, do Ledger cấp theo thứ tự tăng dần bắt đầu từ 1.
pub type AccountNumber = u32;

/// Loại tài khoản cần mở
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Tài khoản thanh toán
    Checking,
    /// Tài khoản tiết kiệm với lãi suất theo tháng (dạng thập phân, 0.02 = 2%)
    Savings { interest_rate: Decimal },
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings { .. } => "savings",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phần chung của mọi tài khoản.
///
/// Chỉ `credit`/`debit` được phép thay đổi số dư.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBase {
    number: AccountNumber,
    name: String,
    balance: Decimal,
}

impl AccountBase {
    pub(crate) fn new(number: AccountNumber, name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            number,
            name: normalize_name(&name.into()),
            balance,
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Gửi tiền. Số tiền âm bị từ chối, 0 là no-op.
    pub(crate) fn credit(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        ensure_non_negative(amount, "Deposit")?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| overflow("Deposit", amount))?;
        Ok(self.balance)
    }

    /// Rút tiền.
    ///
    /// Không có hạn mức thấu chi: số dư được phép xuống dưới 0.
    pub(crate) fn debit(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        self.debit_with_fee(amount, Decimal::ZERO)
    }

    /// Rút `amount` rồi trừ thêm `fee`. Tràn số thì số dư giữ nguyên.
    pub(crate) fn debit_with_fee(&mut self, amount: Decimal, fee: Decimal) -> CoreResult<Decimal> {
        ensure_non_negative(amount, "Withdrawal")?;
        self.balance = self
            .balance
            .checked_sub(amount)
            .and_then(|balance| balance.checked_sub(fee))
            .ok_or_else(|| overflow("Withdrawal", amount))?;
        Ok(self.balance)
    }

    /// Cộng thẳng vào số dư, không kiểm tra dấu (dùng cho lãi cuối tháng).
    pub(crate) fn adjust(&mut self, delta: Decimal) -> CoreResult<Decimal> {
        self.balance = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| overflow("Interest", delta))?;
        Ok(self.balance)
    }
}

/// Tên chủ tài khoản được lưu trên một dòng, các từ cách nhau đúng một dấu cách.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn ensure_non_negative(amount: Decimal, operation: &str) -> CoreResult<()> {
    if amount < Decimal::ZERO {
        return Err(CoreError::InvalidAmount(format!(
            "{} amount must not be negative: {}",
            operation, amount
        )));
    }
    Ok(())
}

pub(crate) fn overflow(operation: &str, amount: Decimal) -> CoreError {
    CoreError::AmountOverflow(format!(
        "{} of {} exceeds the representable balance",
        operation, amount
    ))
}

/// Tập thao tác chung của mọi loại tài khoản.
pub trait BankAccount {
    fn account_number(&self) -> AccountNumber;
    fn name(&self) -> &str;
    fn balance(&self) -> Decimal;

    /// Gửi tiền, trả về số dư mới
    fn deposit(&mut self, amount: Decimal) -> CoreResult<Decimal>;

    /// Rút tiền, trả về số dư mới
    fn withdraw(&mut self, amount: Decimal) -> CoreResult<Decimal>;

    /// Xử lý cuối tháng. Trả về số tiền đã cộng vào tài khoản.
    fn month_end(&mut self) -> CoreResult<Decimal>;

    /// Dòng record dùng để lưu file (xem module `record`)
    fn to_record(&self) -> String;
}

/// Tài khoản trong Ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Account {
    Checking(CheckingAccount),
    Savings(SavingsAccount),
}

impl Account {
    /// Tạo tài khoản mới với số dư 0
    pub fn open(number: AccountNumber, name: impl Into<String>, kind: AccountKind) -> Self {
        match kind {
            AccountKind::Checking => Account::Checking(CheckingAccount::new(number, name)),
            AccountKind::Savings { interest_rate } => {
                Account::Savings(SavingsAccount::new(number, name, interest_rate))
            }
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Checking(_) => AccountKind::Checking,
            Account::Savings(savings) => AccountKind::Savings {
                interest_rate: savings.interest_rate(),
            },
        }
    }

    pub fn as_checking(&self) -> Option<&CheckingAccount> {
        match self {
            Account::Checking(checking) => Some(checking),
            Account::Savings(_) => None,
        }
    }

    pub fn as_savings(&self) -> Option<&SavingsAccount> {
        match self {
            Account::Savings(savings) => Some(savings),
            Account::Checking(_) => None,
        }
    }

    fn inner(&self) -> &dyn BankAccount {
        match self {
            Account::Checking(checking) => checking,
            Account::Savings(savings) => savings,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn BankAccount {
        match self {
            Account::Checking(checking) => checking,
            Account::Savings(savings) => savings,
        }
    }
}

impl BankAccount for Account {
    fn account_number(&self) -> AccountNumber {
        self.inner().account_number()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn balance(&self) -> Decimal {
        self.inner().balance()
    }

    fn deposit(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        self.inner_mut().deposit(amount)
    }

    fn withdraw(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        self.inner_mut().withdraw(amount)
    }

    fn month_end(&mut self) -> CoreResult<Decimal> {
        self.inner_mut().month_end()
    }

    fn to_record(&self) -> String {
        self.inner().to_record()
    }
}

impl From<CheckingAccount> for Account {
    fn from(account: CheckingAccount) -> Self {
        Account::Checking(account)
    }
}

impl From<SavingsAccount> for Account {
    fn from(account: SavingsAccount) -> Self {
        Account::Savings(account)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Account::Checking(checking) => write!(f, "{}", checking),
            Account::Savings(savings) => write!(f, "{}", savings),
        }
    }
}
