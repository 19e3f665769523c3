//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::Environment { variable, message } => {
                write!(f, "environment variable '{variable}' error: {message}")
            }
            Error::ItemProcessing { index, message, .. } => {
                write!(f, "processing work item {index} failed: {message}")
            }
            Error::Signal { operation, source } => {
                write!(f, "signal {operation} failed: {source}")
            }
            Error::ThreadSpawn { name, source } => {
                write!(f, "failed to spawn thread '{name}': {source}")
            }
            Error::ThreadJoin { name, message } => {
                write!(f, "failed to join thread '{name}': {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
        }
    }
}
