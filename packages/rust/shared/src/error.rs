//! Error types for PlainRead.
//!
//! Library crates use [`PlainReadError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all PlainRead operations.
#[derive(Debug, thiserror::Error)]
pub enum PlainReadError {
    /// Input text is empty or too short to translate. Raised before any stage runs.
    #[error("input error: {message}")]
    Input { message: String },

    /// The text source cannot read this document format.
    #[error("unsupported source format: {extension}")]
    UnsupportedSourceFormat { extension: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization of a result or report failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// HTML-to-text conversion error.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// A background translation task panicked or was cancelled.
    #[error("task error: {0}")]
    Task(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PlainReadError>;

impl PlainReadError {
    /// Create an input error from any displayable message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an unsupported-format error for the given file extension.
    pub fn unsupported(extension: impl Into<String>) -> Self {
        Self::UnsupportedSourceFormat {
            extension: extension.into(),
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
        let err = PlainReadError::input("text is empty");
        assert_eq!(err.to_string(), "input error: text is empty");

        let err = PlainReadError::unsupported(".pdf");
        assert!(err.to_string().contains(".pdf"));
    }

    #[test]
    fn io_error_keeps_path() {
        let err = PlainReadError::io(
            "/tmp/missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("missing.txt"));
    }
}
