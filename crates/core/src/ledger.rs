//! # Ledger Module
//!
//! Ledger (ngân hàng) sở hữu toàn bộ tài khoản trong một phiên làm việc:
//! cấp số tài khoản, tìm tài khoản, và chạy xử lý cuối tháng.

use crate::account::{Account, AccountKind, AccountNumber, BankAccount};
use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Kết quả một lần xử lý cuối tháng
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthEndSummary {
    /// Số tài khoản đã xử lý
    pub accounts_processed: usize,
    /// Số tài khoản bỏ qua vì tính lãi bị tràn số (giữ nguyên state)
    pub accounts_skipped: usize,
    /// Tổng tiền lãi đã cộng vào các tài khoản tiết kiệm
    pub interest_credited: Decimal,
}

/// Tập tài khoản theo thứ tự thêm vào.
///
/// Số tài khoản là duy nhất trong một Ledger; tìm kiếm là quét tuyến tính.
/// `u32::MAX` không bao giờ được cấp nên `next_number` luôn tăng được.
#[derive(Debug, Clone)]
pub struct Ledger {
    accounts: Vec<Account>,
    next_number: AccountNumber,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Tạo Ledger rỗng, tài khoản đầu tiên sẽ có số 1
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            next_number: 1,
        }
    }

    /// Mở tài khoản mới, trả về số tài khoản vừa cấp.
    ///
    /// Tên được chuẩn hoá về một dòng (xem [`crate::account::normalize_name`]).
    pub fn create_account(
        &mut self,
        kind: AccountKind,
        name: impl Into<String>,
    ) -> CoreResult<AccountNumber> {
        let number = self.next_number;
        self.next_number = number
            .checked_add(1)
            .ok_or(CoreError::AccountNumbersExhausted)?;

        let account = Account::open(number, name, kind);
        debug!(account = number, %kind, "opened account");
        self.accounts.push(account);
        Ok(number)
    }

    /// Mở tài khoản thanh toán
    pub fn open_checking(&mut self, name: impl Into<String>) -> CoreResult<AccountNumber> {
        self.create_account(AccountKind::Checking, name)
    }

    /// Mở tài khoản tiết kiệm
    pub fn open_savings(
        &mut self,
        name: impl Into<String>,
        interest_rate: Decimal,
    ) -> CoreResult<AccountNumber> {
        self.create_account(AccountKind::Savings { interest_rate }, name)
    }

    /// Thêm tài khoản đã lưu trước đó (giữ nguyên số tài khoản).
    ///
    /// Tài khoản mở sau đó sẽ nhận số lớn hơn mọi số đã có.
    pub fn restore(&mut self, account: Account) -> CoreResult<()> {
        let number = account.account_number();
        let next = number.checked_add(1).ok_or_else(|| {
            CoreError::malformed(format!("account number {} is out of range", number))
        })?;
        if self.find_account(number).is_some() {
            return Err(CoreError::DuplicateAccount(number));
        }

        self.next_number = self.next_number.max(next);
        self.accounts.push(account);
        Ok(())
    }

    pub fn find_account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.account_number() == number)
    }

    pub fn find_account_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.account_number() == number)
    }

    /// Gửi tiền vào tài khoản `number`, trả về số dư mới
    pub fn deposit(&mut self, number: AccountNumber, amount: Decimal) -> CoreResult<Decimal> {
        self.find_account_mut(number)
            .ok_or(CoreError::AccountNotFound(number))?
            .deposit(amount)
    }

    /// Rút tiền từ tài khoản `number`, trả về số dư mới
    pub fn withdraw(&mut self, number: AccountNumber, amount: Decimal) -> CoreResult<Decimal> {
        self.find_account_mut(number)
            .ok_or(CoreError::AccountNotFound(number))?
            .withdraw(amount)
    }

    /// Chạy xử lý cuối tháng cho mọi tài khoản theo thứ tự trong Ledger.
    ///
    /// Tài khoản bị tràn số được log, bỏ qua và đếm vào `accounts_skipped`.
    pub fn process_end_month(&mut self) -> MonthEndSummary {
        let mut summary = MonthEndSummary {
            accounts_processed: 0,
            accounts_skipped: 0,
            interest_credited: Decimal::ZERO,
        };

        for account in self.accounts.iter_mut() {
            match account.month_end() {
                Ok(interest) => {
                    summary.interest_credited = summary.interest_credited.saturating_add(interest);
                    summary.accounts_processed += 1;
                }
                Err(err) => {
                    warn!(account = account.account_number(), "month end skipped: {}", err);
                    summary.accounts_skipped += 1;
                }
            }
        }

        debug!(
            accounts = summary.accounts_processed,
            skipped = summary.accounts_skipped,
            interest_credited = %summary.interest_credited,
            "processed month end"
        );
        summary
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Số sẽ cấp cho tài khoản mở tiếp theo
    pub fn next_account_number(&self) -> AccountNumber {
        self.next_number
    }

    /// Các dòng record của toàn bộ tài khoản, theo thứ tự trong Ledger
    pub fn to_records(&self) -> Vec<String> {
        self.accounts.iter().map(|account| account.to_record()).collect()
    }
}
