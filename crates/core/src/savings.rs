//! # Savings Account
//!
//! Tài khoản tiết kiệm: lãi cuối tháng tính trên số dư thấp nhất trong
//! tháng, không phải số dư hiện tại hay số dư trung bình.

use crate::account::{overflow, AccountBase, AccountNumber, BankAccount};
use crate::error::CoreResult;
use crate::record;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavingsAccount {
    #[serde(flatten)]
    base: AccountBase,
    /// Lãi suất mỗi tháng dạng thập phân (0.02 = 2%)
    interest_rate: Decimal,
    /// Số dư thấp nhất kể từ lần xử lý cuối tháng gần nhất
    minimum_balance_of_month: Decimal,
}

impl SavingsAccount {
    /// Tạo tài khoản mới với số dư 0
    pub fn new(number: AccountNumber, name: impl Into<String>, interest_rate: Decimal) -> Self {
        Self::restore(number, name, interest_rate, Decimal::ZERO, Decimal::ZERO)
    }

    /// Dựng lại tài khoản từ state đã lưu
    pub fn restore(
        number: AccountNumber,
        name: impl Into<String>,
        interest_rate: Decimal,
        balance: Decimal,
        minimum_balance_of_month: Decimal,
    ) -> Self {
        Self {
            base: AccountBase::new(number, name, balance),
            interest_rate,
            minimum_balance_of_month,
        }
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn minimum_balance_of_month(&self) -> Decimal {
        self.minimum_balance_of_month
    }
}

impl BankAccount for SavingsAccount {
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

    fn withdraw(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        let balance = self.base.debit(amount)?;
        self.minimum_balance_of_month = self.minimum_balance_of_month.min(balance);
        Ok(balance)
    }

    /// Cộng lãi `minimum * rate` rồi đặt lại minimum bằng số dư sau lãi.
    ///
    /// Minimum âm cho ra lãi âm; khoản này vẫn được cộng thẳng vào số dư.
    fn month_end(&mut self) -> CoreResult<Decimal> {
        let interest = self
            .minimum_balance_of_month
            .checked_mul(self.interest_rate)
            .ok_or_else(|| overflow("Interest", self.minimum_balance_of_month))?;
        let balance = self.base.adjust(interest)?;
        self.minimum_balance_of_month = balance;

        debug!(
            account = self.base.number(),
            %interest,
            %balance,
            "credited monthly interest"
        );
        Ok(interest)
    }

    fn to_record(&self) -> String {
        format!(
            "{}{} {} {} {} {}",
            record::SAVINGS_TAG,
            record::format_number(self.base.number()),
            record::format_decimal(self.base.balance()),
            record::format_decimal(self.minimum_balance_of_month),
            record::format_decimal(self.interest_rate),
            self.base.name()
        )
    }
}

impl fmt::Display for SavingsAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Savings #{:02} {} (balance: {}, rate: {}, minimum this month: {})",
            self.base.number(),
            self.base.name(),
            self.base.balance(),
            self.interest_rate,
            self.minimum_balance_of_month
        )
    }
}
