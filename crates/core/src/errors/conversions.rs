//! Conversion implementations for error types

use super::types::Error;
use std::path::PathBuf;

// Conversion implementations (kept explicit so callers can still attach
// better context through the builders when they have it)
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Error::Configuration {
            message: format!("internal error: {error}"),
        }
    }
}
