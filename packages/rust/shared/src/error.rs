//! Error types for taxsubset.
//!
//! Library crates use [`TaxsubsetError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all taxsubset operations.
#[derive(Debug, thiserror::Error)]
pub enum TaxsubsetError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error during the taxonomy fetch.
    #[error("network error: {0}")]
    Network(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (empty body, oversized response, bad subset file).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TaxsubsetError>;

impl TaxsubsetError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = TaxsubsetError::config("source url is empty");
        assert_eq!(err.to_string(), "config error: source url is empty");

        let err = TaxsubsetError::Network("HTTP 503".into());
        assert_eq!(err.to_string(), "network error: HTTP 503");

        let err = TaxsubsetError::validation("subset count mismatch: 3 != 4");
        assert!(err.to_string().contains("count mismatch"));
    }
}
