//! # Record Module
//!
//! Định dạng dòng dùng để lưu tài khoản ra file text, mỗi tài khoản một dòng:
//!
//! ```text
//! C<number> <balance> <withdrawal_count> <name...>
//! S<number> <balance> <minimum_balance_of_month> <interest_rate> <name...>
//! ```
//!
//! Số tài khoản được ghi tối thiểu hai chữ số (`C07`). Khi đọc, mọi ký tự sau
//! tag đều phải là chữ số nên số có ba chữ số trở lên vẫn đọc được.

use crate::account::{Account, AccountNumber};
use crate::checking::CheckingAccount;
use crate::error::{CoreError, CoreResult};
use crate::savings::SavingsAccount;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const CHECKING_TAG: char = 'C';
pub const SAVINGS_TAG: char = 'S';

pub(crate) fn format_number(number: AccountNumber) -> String {
    format!("{:02}", number)
}

pub(crate) fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Tách dòng theo khoảng trắng và đọc lần lượt từng field.
struct Fields<'a> {
    tokens: std::str::Split<'a, char>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            tokens: line.split(' '),
        }
    }

    fn next_token(&mut self, field: &str) -> CoreResult<&'a str> {
        self.tokens
            .find(|token| !token.is_empty())
            .ok_or_else(|| CoreError::malformed(format!("missing {}", field)))
    }

    fn decimal(&mut self, field: &str) -> CoreResult<Decimal> {
        let token = self.next_token(field)?;
        Decimal::from_str(token)
            .map_err(|_| CoreError::malformed(format!("invalid {} '{}'", field, token)))
    }

    fn count(&mut self, field: &str) -> CoreResult<u32> {
        let token = self.next_token(field)?;
        token
            .parse::<u32>()
            .map_err(|_| CoreError::malformed(format!("invalid {} '{}'", field, token)))
    }

    /// Phần còn lại của dòng là tên chủ tài khoản, nối lại bằng một dấu cách.
    fn name(self) -> String {
        self.tokens
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn parse_number(digits: &str) -> CoreResult<AccountNumber> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::malformed(format!(
            "invalid account number '{}'",
            digits
        )));
    }
    match digits.parse::<AccountNumber>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(CoreError::malformed(format!(
            "invalid account number '{}'",
            digits
        ))),
    }
}

impl FromStr for Account {
    type Err = CoreError;

    fn from_str(line: &str) -> CoreResult<Self> {
        let line = line.trim_end();
        let mut fields = Fields::new(line);
        let head = fields.next_token("type tag")?;

        let mut chars = head.chars();
        let tag = chars
            .next()
            .ok_or_else(|| CoreError::malformed("empty record"))?;
        let number = chars.as_str();

        match tag {
            CHECKING_TAG => {
                let number = parse_number(number)?;
                let balance = fields.decimal("balance")?;
                let withdrawal_count = fields.count("withdrawal count")?;
                let name = fields.name();
                Ok(CheckingAccount::restore(number, name, balance, withdrawal_count).into())
            }
            SAVINGS_TAG => {
                let number = parse_number(number)?;
                let balance = fields.decimal("balance")?;
                let minimum_balance_of_month = fields.decimal("minimum balance")?;
                let interest_rate = fields.decimal("interest rate")?;
                let name = fields.name();
                Ok(SavingsAccount::restore(
                    number,
                    name,
                    interest_rate,
                    balance,
                    minimum_balance_of_month,
                )
                .into())
            }
            other => Err(CoreError::malformed(format!(
                "lines must begin with {} or {}, found '{}'",
                CHECKING_TAG, SAVINGS_TAG, other
            ))),
        }
    }
}

/// Đọc một dòng record thành Account
pub fn parse_record(line: &str) -> CoreResult<Account> {
    line.parse()
}
