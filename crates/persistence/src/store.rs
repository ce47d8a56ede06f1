//! Account stores - nơi đọc/ghi các dòng record
//!
//! Core chỉ thấy interface `load_lines` / `save_lines`; file text là một
//! implementation, bộ nhớ là một implementation khác (dùng cho test/demo).

use crate::error::{PersistenceError, PersistenceResult};
use minibank_core::{CoreError, CoreResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Một dòng đọc từ store. Dòng không giải mã được vẫn giữ vị trí của nó.
pub type LoadedLine = CoreResult<String>;

/// Nguồn/đích lưu trữ tài khoản dạng dòng text.
pub trait AccountStore {
    /// Đọc toàn bộ các dòng record.
    ///
    /// Lỗi ở cấp nguồn (không mở được) là `Err`; lỗi của từng dòng nằm trong
    /// phần tử tương ứng để phần còn lại vẫn được đọc.
    fn load_lines(&self) -> PersistenceResult<Vec<LoadedLine>>;

    /// Ghi đè toàn bộ bằng các dòng record mới (snapshot, không append)
    fn save_lines(&mut self, lines: &[String]) -> PersistenceResult<()>;
}

/// Flat-file store - mỗi tài khoản một dòng trong một file text.
///
/// Đường dẫn được truyền vào lúc tạo, không có hằng số toàn cục.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    /// Tạo store cho file `path` (file chưa cần tồn tại)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountStore for FlatFileStore {
    fn load_lines(&self) -> PersistenceResult<Vec<LoadedLine>> {
        let content =
            fs::read(&self.path).map_err(|e| PersistenceError::source_unavailable(&self.path, e))?;

        let lines = split_lines(&content);
        debug!(path = %self.path.display(), lines = lines.len(), "read account file");
        Ok(lines)
    }

    fn save_lines(&mut self, lines: &[String]) -> PersistenceResult<()> {
        let write = || -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(&self.path)?);
            for line in lines {
                writeln!(writer, "{}", line)?;
            }
            writer.flush()
        };
        write().map_err(|e| PersistenceError::sink_unwritable(&self.path, e))?;

        debug!(path = %self.path.display(), lines = lines.len(), "wrote account file");
        Ok(())
    }
}

/// Tách nội dung file theo `\n` (bỏ `\r` cuối dòng), giải mã UTF-8 từng dòng.
fn split_lines(content: &[u8]) -> Vec<LoadedLine> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    if body.is_empty() {
        return Vec::new();
    }

    body.split(|&byte| byte == b'\n')
        .map(|raw| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            String::from_utf8(raw.to_vec())
                .map_err(|e| CoreError::malformed(format!("line is not valid UTF-8: {}", e)))
        })
        .collect()
}

/// In-memory store. `None` nghĩa là nguồn chưa tồn tại.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    lines: Option<Vec<String>>,
}

impl MemoryStore {
    /// Store rỗng, giống file chưa được tạo
    pub fn new() -> Self {
        Self::default()
    }

    /// Store có sẵn nội dung
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Some(lines.into_iter().map(Into::into).collect()),
        }
    }

    /// Nội dung đã lưu gần nhất
    pub fn lines(&self) -> Option<&[String]> {
        self.lines.as_deref()
    }
}

impl AccountStore for MemoryStore {
    fn load_lines(&self) -> PersistenceResult<Vec<LoadedLine>> {
        let lines = self.lines.as_ref().ok_or_else(|| {
            PersistenceError::source_unavailable(
                "<memory>",
                std::io::Error::new(std::io::ErrorKind::NotFound, "store is empty"),
            )
        })?;
        Ok(lines.iter().cloned().map(Ok).collect())
    }

    fn save_lines(&mut self, lines: &[String]) -> PersistenceResult<()> {
        self.lines = Some(lines.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn loaded<S: AccountStore>(store: &S) -> Vec<String> {
        store
            .load_lines()
            .unwrap()
            .into_iter()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn test_flat_file_missing_source() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("bank.dat"));

        let err = store.load_lines().unwrap_err();
        assert!(err.is_source_missing());
    }

    #[test]
    fn test_flat_file_save_and_load() {
        let dir = tempdir().unwrap();
        let mut store = FlatFileStore::new(dir.path().join("bank.dat"));

        let lines = vec!["C01 50 0 Alice".to_string(), "S02 10 10 0.05 Bob".to_string()];
        store.save_lines(&lines).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "C01 50 0 Alice\nS02 10 10 0.05 Bob\n");
        assert_eq!(loaded(&store), lines);
    }

    #[test]
    fn test_flat_file_save_overwrites() {
        let dir = tempdir().unwrap();
        let mut store = FlatFileStore::new(dir.path().join("bank.dat"));

        store
            .save_lines(&["C01 1 0 A".to_string(), "C02 2 0 B".to_string()])
            .unwrap();
        store.save_lines(&["C03 3 0 C".to_string()]).unwrap();

        assert_eq!(loaded(&store), vec!["C03 3 0 C".to_string()]);
    }

    #[test]
    fn test_flat_file_unwritable_sink() {
        let dir = tempdir().unwrap();
        let mut store = FlatFileStore::new(dir.path().join("missing-dir").join("bank.dat"));

        let err = store.save_lines(&["C01 1 0 A".to_string()]).unwrap_err();
        assert!(matches!(err, PersistenceError::SinkUnwritable { .. }));
    }

    #[test]
    fn test_flat_file_reads_crlf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.dat");
        fs::write(&path, "C01 50 0 Alice\r\nC02 5 1 Bob\r\n").unwrap();

        let lines = loaded(&FlatFileStore::new(&path));
        assert_eq!(lines, vec!["C01 50 0 Alice".to_string(), "C02 5 1 Bob".to_string()]);
    }

    #[test]
    fn test_flat_file_invalid_utf8_only_fails_its_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.dat");
        fs::write(&path, b"C01 50 0 Alice\nC02 5 0 Jos\xe9\nC03 1 0 Carol").unwrap();

        let lines = FlatFileStore::new(&path).load_lines().unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], Ok("C01 50 0 Alice".to_string()));
        assert!(lines[1].as_ref().unwrap_err().is_malformed_record());
        assert_eq!(lines[2], Ok("C03 1 0 Carol".to_string()));
    }

    #[test]
    fn test_flat_file_empty_and_directory_sources() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.dat");
        fs::write(&path, "").unwrap();
        assert!(loaded(&FlatFileStore::new(&path)).is_empty());

        let err = FlatFileStore::new(dir.path()).load_lines().unwrap_err();
        assert!(matches!(err, PersistenceError::SourceUnavailable { .. }));
        assert!(!err.is_source_missing());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load_lines().unwrap_err().is_source_missing());

        store.save_lines(&["C01 1 0 A".to_string()]).unwrap();
        assert_eq!(store.lines(), Some(&["C01 1 0 A".to_string()][..]));
        assert_eq!(loaded(&MemoryStore::with_lines(["x"])), vec!["x".to_string()]);
    }
}
