//! Error types shared across Smilyface crates.
//!
//! The per-frame render path never fails; these errors cover the edges of
//! the system: loading tuning files, parsing snapshot streams, writing output.

use std::path::PathBuf;

/// Top-level error type for Smilyface operations.
#[derive(Debug, thiserror::Error)]
pub enum SmilyError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Snapshot error on line {line}: {message}")]
    Snapshot { line: usize, message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SmilyError.
pub type SmilyResult<T> = Result<T, SmilyError>;

impl SmilyError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn snapshot(line: usize, msg: impl Into<String>) -> Self {
        Self::Snapshot {
            line,
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_error_mentions_line() {
        let err = SmilyError::snapshot(7, "expected value");
        assert_eq!(err.to_string(), "Snapshot error on line 7: expected value");
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SmilyError::from(io);
        assert_eq!(err.to_string(), "gone");
    }
}
