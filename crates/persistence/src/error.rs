//! # Persistence Errors
//!
//! Error types cho persistence layer, wrapping IO errors và record errors.

use minibank_core::CoreError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === Load errors ===
    #[error("Account source unavailable: {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: CoreError,
    },

    // === Save errors ===
    #[error("Account sink unwritable: {}: {source}", .path.display())]
    SinkUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Refusing to overwrite an account source that could not be read")]
    UnreadSource,
}

/// Result type alias cho PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Tạo SourceUnavailable error
    pub fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Tạo SinkUnwritable error
    pub fn sink_unwritable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SinkUnwritable {
            path: path.into(),
            source,
        }
    }

    /// Kiểm tra nguồn dữ liệu chưa tồn tại (lần chạy đầu tiên)
    pub fn is_source_missing(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }

    /// Nguồn tồn tại nhưng không đọc được; ghi đè sẽ làm mất dữ liệu
    pub fn is_source_unreadable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. }) && !self.is_source_missing()
    }

    /// Kiểm tra có phải lỗi dòng record không
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}
