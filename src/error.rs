//! Error types for the fasthash library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fasthash operations.
///
/// Hashing itself never fails; errors come from parsing, configuration and file input.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// Text is not a 32-digit hex digest
    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    /// Seed is not a 32-bit unsigned integer
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// Unknown option value in config or on the command line
    #[error("Invalid config: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed config file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a config error from a string.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias for fasthash operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::InvalidDigest("xyz".into());
        assert!(e.to_string().contains("xyz"));

        let e = Error::FileNotFound(PathBuf::from("missing.bin"));
        assert!(e.to_string().contains("missing.bin"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
