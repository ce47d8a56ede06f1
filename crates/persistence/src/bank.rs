//! Bank - một phiên làm việc với Ledger
//!
//! Mở: đọc record từ store, dựng Ledger, gom các cảnh báo không fatal.
//! Đóng: ghi toàn bộ Ledger trở lại store. Nếu nguồn có tồn tại mà không đọc
//! được thì không bao giờ ghi đè lên nó.

use crate::error::{PersistenceError, PersistenceResult};
use crate::store::AccountStore;
use minibank_core::{parse_record, Ledger};
use tracing::{error, info, warn};

/// Bank facade - Ledger cùng store nơi nó được đọc ra và ghi vào
pub struct Bank<S: AccountStore> {
    store: S,
    ledger: Ledger,
    warnings: Vec<PersistenceError>,
    source_unreadable: bool,
}

impl<S: AccountStore> Bank<S> {
    /// Mở ngân hàng từ store.
    ///
    /// Không bao giờ thất bại: nguồn không đọc được thì Ledger rỗng, dòng hỏng
    /// thì bị bỏ qua. Mọi vấn đề được log và giữ lại trong `warnings()`.
    pub fn open(store: S) -> Self {
        let mut ledger = Ledger::new();
        let mut warnings = Vec::new();
        let mut source_unreadable = false;

        match store.load_lines() {
            Ok(lines) => {
                for (index, line) in lines.into_iter().enumerate() {
                    if matches!(&line, Ok(text) if text.trim().is_empty()) {
                        continue;
                    }

                    let restored = line
                        .and_then(|line| parse_record(&line))
                        .and_then(|account| {
                            let description = account.to_string();
                            ledger.restore(account).map(|_| description)
                        });

                    match restored {
                        Ok(description) => info!("[Read] {}", description),
                        Err(source) => {
                            let warning = PersistenceError::MalformedRecord {
                                line: index + 1,
                                source,
                            };
                            warn!("{}", warning);
                            warnings.push(warning);
                        }
                    }
                }
            }
            Err(err) if err.is_source_missing() => {
                info!("{}; starting with no accounts", err);
                warnings.push(err);
            }
            Err(err) => {
                warn!("{}; starting with no accounts, saving is disabled", err);
                source_unreadable = true;
                warnings.push(err);
            }
        }

        Self {
            store,
            ledger,
            warnings,
            source_unreadable,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Có được phép ghi đè nguồn không
    pub fn can_save(&self) -> bool {
        !self.source_unreadable
    }

    /// Các vấn đề gặp phải khi mở (file thiếu, dòng hỏng)
    pub fn warnings(&self) -> &[PersistenceError] {
        &self.warnings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ghi toàn bộ tài khoản ra store, trả về số tài khoản đã ghi.
    ///
    /// Lỗi ghi không làm thay đổi Ledger trong bộ nhớ. Nguồn không đọc được
    /// lúc mở thì trả về `UnreadSource` và không ghi gì.
    pub fn save(&mut self) -> PersistenceResult<usize> {
        if self.source_unreadable {
            let err = PersistenceError::UnreadSource;
            error!("{}", err);
            return Err(err);
        }

        let records = self.ledger.to_records();

        if let Err(err) = self.store.save_lines(&records) {
            error!("{}", err);
            return Err(err);
        }

        for account in self.ledger.accounts() {
            info!("Saved {}", account);
        }
        Ok(records.len())
    }

    /// Lưu rồi trả lại store
    pub fn close(mut self) -> PersistenceResult<S> {
        self.save()?;
        Ok(self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FlatFileStore, MemoryStore};
    use minibank_core::{BankAccount, CoreError};
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_open_skips_malformed_line() {
        let store = MemoryStore::with_lines(["garbage line", "C01 50.0 0 Alice"]);
        let bank = Bank::open(store);

        assert_eq!(bank.ledger().len(), 1);
        let alice = bank.ledger().find_account(1).unwrap();
        assert_eq!(alice.name(), "Alice");
        assert_eq!(alice.balance(), dec!(50.0));

        assert_eq!(bank.warnings().len(), 1);
        match &bank.warnings()[0] {
            PersistenceError::MalformedRecord { line, source } => {
                assert_eq!(*line, 1);
                assert!(source.is_malformed_record());
            }
            other => panic!("unexpected warning: {:?}", other),
        }
    }

    #[test]
    fn test_open_missing_source_starts_empty() {
        let dir = tempdir().unwrap();
        let bank = Bank::open(FlatFileStore::new(dir.path().join("bank.dat")));

        assert!(bank.ledger().is_empty());
        assert_eq!(bank.warnings().len(), 1);
        assert!(bank.warnings()[0].is_source_missing());
    }

    #[test]
    fn test_open_rejects_duplicate_numbers() {
        let store =
            MemoryStore::with_lines(["C01 50 0 Alice", "S01 10 10 0.01 Bob", "", "C02 1 0 Carol"]);
        let bank = Bank::open(store);

        assert_eq!(bank.ledger().len(), 2);
        assert_eq!(bank.warnings().len(), 1);
        assert!(matches!(
            &bank.warnings()[0],
            PersistenceError::MalformedRecord {
                line: 2,
                source: CoreError::DuplicateAccount(1)
            }
        ));
    }

    #[test]
    fn test_open_skips_undecodable_line_and_keeps_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.dat");
        fs::write(&path, b"C01 50 0 Alice\nC02 5 0 Jos\xe9\n").unwrap();

        let mut bank = Bank::open(FlatFileStore::new(&path));

        assert_eq!(bank.ledger().len(), 1);
        assert_eq!(bank.ledger().find_account(1).map(|a| a.name()), Some("Alice"));
        assert_eq!(bank.warnings().len(), 1);
        assert!(matches!(
            &bank.warnings()[0],
            PersistenceError::MalformedRecord { line: 2, .. }
        ));

        assert!(bank.can_save());
        bank.save().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "C01 50 0 Alice\n");
    }

    #[test]
    fn test_unreadable_source_is_never_overwritten() {
        let dir = tempdir().unwrap();
        let mut bank = Bank::open(FlatFileStore::new(dir.path()));

        assert!(bank.ledger().is_empty());
        assert_eq!(bank.warnings().len(), 1);
        assert!(bank.warnings()[0].is_source_unreadable());
        assert!(!bank.can_save());

        bank.ledger_mut().open_checking("Jane Doe").unwrap();
        let err = bank.save().unwrap_err();

        assert!(matches!(err, PersistenceError::UnreadSource));
        assert!(dir.path().is_dir());
        assert!(bank.close().is_err());
    }

    #[test]
    fn test_open_rejects_unassignable_account_number() {
        let store = MemoryStore::with_lines(["C4294967295 1 0 Big", "C01 2 0 Small"]);
        let mut bank = Bank::open(store);

        assert_eq!(bank.ledger().len(), 1);
        assert!(bank.warnings()[0].is_malformed_record());
        assert_eq!(bank.ledger_mut().open_checking("Next"), Ok(2));
    }

    #[test]
    fn test_session_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.dat");

        {
            let mut bank = Bank::open(FlatFileStore::new(&path));
            let ledger = bank.ledger_mut();
            let jane = ledger.open_checking("Jane Doe").unwrap();
            let john = ledger.open_savings("John Smith", dec!(0.05)).unwrap();
            ledger.deposit(jane, dec!(100.00)).unwrap();
            ledger.deposit(john, dec!(200.00)).unwrap();
            ledger.process_end_month();
            for _ in 0..4 {
                ledger.withdraw(jane, dec!(10)).unwrap();
            }
            ledger.withdraw(john, dec!(50)).unwrap();

            assert_eq!(bank.save().unwrap(), 2);
        }

        let mut bank = Bank::open(FlatFileStore::new(&path));
        assert!(bank.warnings().is_empty());

        let jane = bank.ledger().find_account(1).and_then(|a| a.as_checking()).unwrap();
        assert_eq!(jane.balance(), dec!(59.00));
        assert_eq!(jane.withdrawal_count(), 4);

        let summary = bank.ledger_mut().process_end_month();
        assert_eq!(summary.interest_credited, dec!(7.50));
        let john = bank.ledger().find_account(2).and_then(|a| a.as_savings()).unwrap();
        assert_eq!(john.balance(), dec!(157.50));
        assert_eq!(john.minimum_balance_of_month(), dec!(157.50));

        assert_eq!(bank.ledger_mut().open_checking("Carol"), Ok(3));
        bank.save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "C01 59 0 Jane Doe\nS02 157.5 157.5 0.05 John Smith\nC03 0 0 Carol\n"
        );
    }

    #[test]
    fn test_failed_save_keeps_ledger() {
        let dir = tempdir().unwrap();
        let mut bank = Bank::open(FlatFileStore::new(dir.path().join("nope").join("bank.dat")));
        bank.ledger_mut().open_checking("Jane Doe").unwrap();

        let err = bank.save().unwrap_err();

        assert!(matches!(err, PersistenceError::SinkUnwritable { .. }));
        assert_eq!(bank.ledger().len(), 1);
    }

    #[test]
    fn test_close_returns_store() {
        let mut bank = Bank::open(MemoryStore::new());
        bank.ledger_mut().open_savings("Saver", dec!(0.02)).unwrap();

        let store = bank.close().unwrap();
        assert_eq!(store.lines(), Some(&["S01 0 0 0.02 Saver".to_string()][..]));
    }
}
