//! Error types for comparison operations

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parser::TabularFormat;

pub type Result<T> = std::result::Result<T, CompareError>;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unreadable {format} file {}: {reason}", path.display())]
    UnreadableTabularFile {
        path: PathBuf,
        format: TabularFormat,
        reason: String,
    },

    #[error("{format} support is not available (rebuild with the `{feature}` feature)")]
    CapabilityUnavailable {
        format: TabularFormat,
        feature: &'static str,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompareError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Wrap a parser failure, keeping the whole context chain as the reason.
    pub fn unreadable(path: &Path, format: TabularFormat, err: anyhow::Error) -> Self {
        Self::UnreadableTabularFile {
            path: path.to_path_buf(),
            format,
            reason: format!("{:#}", err),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::UnreadableTabularFile { .. })
    }

    pub fn is_capability_unavailable(&self) -> bool {
        matches!(self, Self::CapabilityUnavailable { .. })
    }
}
