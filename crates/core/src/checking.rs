//! # Checking Account
//!
//! Tài khoản thanh toán: đếm số lần rút trong tháng và thu phí khi vượt
//! quá số lần miễn phí.

use crate::account::{AccountBase, AccountNumber, BankAccount};
use crate::error::CoreResult;
use crate::record;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Số lần rút miễn phí mỗi tháng
pub const MAXIMUM_FREE_WITHDRAWALS: u32 = 3;

/// Phí cho mỗi lần rút vượt quá [`MAXIMUM_FREE_WITHDRAWALS`]
pub const EXCESS_WITHDRAWAL_FEE: Decimal = Decimal::ONE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckingAccount {
    #[serde(flatten)]
    base: AccountBase,
    /// Số lần rút kể từ lần xử lý cuối tháng gần nhất
    withdrawal_count: u32,
}

impl CheckingAccount {
    /// Tạo tài khoản mới: số dư 0, chưa rút lần nào
    pub fn new(number: AccountNumber, name: impl Into<String>) -> Self {
        Self::restore(number, name, Decimal::ZERO, 0)
    }

    /// Dựng lại tài khoản từ state đã lưu
    pub fn restore(
        number: AccountNumber,
        name: impl Into<String>,
        balance: Decimal,
        withdrawal_count: u32,
    ) -> Self {
        Self {
            base: AccountBase::new(number, name, balance),
            withdrawal_count,
        }
    }

    pub fn withdrawal_count(&self) -> u32 {
        self.withdrawal_count
    }
}

impl BankAccount for CheckingAccount {
    fn account_number(&self) -> AccountNumber {
        self.base.number()
    }

    fn name(&self) -> &str {
        self.base.name()
    }

    fn balance(&self) -> Decimal {
        self.base.balance()
    }

    fn deposit(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        self.base.credit(amount)
    }

    /// Rút tiền rồi tăng bộ đếm. Phí được trừ cùng lần rút nên không tự
    /// tăng bộ đếm thêm lần nữa; lỗi thì cả số dư lẫn bộ đếm giữ nguyên.
    fn withdraw(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        let withdrawals = self.withdrawal_count.saturating_add(1);
        let fee = if withdrawals > MAXIMUM_FREE_WITHDRAWALS {
            EXCESS_WITHDRAWAL_FEE
        } else {
            Decimal::ZERO
        };

        let balance = self.base.debit_with_fee(amount, fee)?;
        self.withdrawal_count = withdrawals;

        if !fee.is_zero() {
            debug!(
                account = self.base.number(),
                withdrawals = self.withdrawal_count,
                "charged excess withdrawal fee"
            );
        }

        Ok(balance)
    }

    fn month_end(&mut self) -> CoreResult<Decimal> {
        self.withdrawal_count = 0;
        Ok(Decimal::ZERO)
    }

    fn to_record(&self) -> String {
        format!(
            "{}{} {} {} {}",
            record::CHECKING_TAG,
            record::format_number(self.base.number()),
            record::format_decimal(self.base.balance()),
            self.withdrawal_count,
            self.base.name()
        )
    }
}

impl fmt::Display for CheckingAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Checking #{:02} {} (balance: {}, withdrawals this month: {})",
            self.base.number(),
            self.base.name(),
            self.base.balance(),
            self.withdrawal_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_checking_account() {
        let account = CheckingAccount::new(1, "Jane Doe");
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.withdrawal_count(), 0);
    }

    #[test]
    fn test_fourth_withdrawal_charges_fee() {
        let mut account = CheckingAccount::restore(1, "Jane Doe", dec!(100.00), 0);

        for _ in 0..4 {
            account.withdraw(dec!(10)).unwrap();
        }

        assert_eq!(account.balance(), dec!(59.00));
        assert_eq!(account.withdrawal_count(), 4);
    }

    #[test]
    fn test_free_withdrawals_have_no_fee() {
        let mut account = CheckingAccount::restore(1, "Jane Doe", dec!(100), 0);

        for _ in 0..MAXIMUM_FREE_WITHDRAWALS {
            account.withdraw(dec!(5)).unwrap();
        }

        assert_eq!(account.balance(), dec!(85));
    }

    #[test]
    fn test_fees_do_not_cascade() {
        let mut account = CheckingAccount::restore(2, "Heavy User", dec!(1000), 0);
        let withdrawals = [dec!(10), dec!(20), dec!(30), dec!(40), dec!(50), dec!(60), dec!(70)];

        for amount in withdrawals {
            account.withdraw(amount).unwrap();
        }

        let total: Decimal = withdrawals.iter().sum();
        let fees = Decimal::from(withdrawals.len() as u32 - MAXIMUM_FREE_WITHDRAWALS)
            * EXCESS_WITHDRAWAL_FEE;
        assert_eq!(account.balance(), dec!(1000) - total - fees);
        assert_eq!(account.withdrawal_count(), withdrawals.len() as u32);
    }

    #[test]
    fn test_restored_count_counts_toward_threshold() {
        let mut account = CheckingAccount::restore(3, "Restored", dec!(50), 3);

        account.withdraw(dec!(10)).unwrap();

        assert_eq!(account.balance(), dec!(39));
        assert_eq!(account.withdrawal_count(), 4);
    }

    #[test]
    fn test_month_end_resets_count() {
        for count in [0, 1, 3, 4, 250] {
            let mut account = CheckingAccount::restore(1, "Jane Doe", dec!(10), count);
            let credited = account.month_end().unwrap();

            assert_eq!(credited, Decimal::ZERO);
            assert_eq!(account.withdrawal_count(), 0);
            assert_eq!(account.balance(), dec!(10));
        }
    }

    #[test]
    fn test_month_end_restarts_free_withdrawals() {
        let mut account = CheckingAccount::restore(1, "Jane Doe", dec!(100), 0);
        for _ in 0..4 {
            account.withdraw(dec!(1)).unwrap();
        }
        account.month_end().unwrap();
        account.withdraw(dec!(1)).unwrap();

        assert_eq!(account.balance(), dec!(100) - dec!(5) - dec!(1));
        assert_eq!(account.withdrawal_count(), 1);
    }

    #[test]
    fn test_failed_withdrawal_keeps_count() {
        let mut account = CheckingAccount::restore(4, "Deep", -Decimal::MAX, 3);

        let err = account.withdraw(Decimal::ZERO).unwrap_err();

        assert!(err.is_overflow());
        assert_eq!(account.balance(), -Decimal::MAX);
        assert_eq!(account.withdrawal_count(), 3);
    }

    #[test]
    fn test_saturated_count_still_charges_fee() {
        let mut account = CheckingAccount::restore(5, "Busy", dec!(10), u32::MAX);

        assert_eq!(account.withdraw(dec!(1)).unwrap(), dec!(8));
        assert_eq!(account.withdrawal_count(), u32::MAX);
    }

    #[test]
    fn test_checking_record() {
        let account = CheckingAccount::restore(7, "Jane Doe", dec!(59.00), 4);
        assert_eq!(account.to_record(), "C07 59 4 Jane Doe");
    }

    #[test]
    fn test_checking_display() {
        let account = CheckingAccount::restore(7, "Jane Doe", dec!(59.00), 4);
        assert_eq!(
            account.to_string(),
            "Checking #07 Jane Doe (balance: 59.00, withdrawals this month: 4)"
        );
    }
}
