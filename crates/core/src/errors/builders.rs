//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create an environment variable error
    #[must_use]
    pub fn environment(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Environment {
            variable: variable.into(),
            message: message.into(),
        }
    }

    /// Create an item processing error
    #[must_use]
    pub fn item_processing(index: usize, message: impl Into<String>) -> Self {
        Error::ItemProcessing {
            index,
            message: message.into(),
            source: None,
        }
    }

    /// Create an item processing error with a source error
    #[must_use]
    pub fn item_processing_with_source(
        index: usize,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::ItemProcessing {
            index,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a signal subscription error
    #[must_use]
    pub fn signal(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Signal {
            operation: operation.into(),
            source,
        }
    }

    /// Create a thread spawn error
    #[must_use]
    pub fn thread_spawn(name: impl Into<String>, source: std::io::Error) -> Self {
        Error::ThreadSpawn {
            name: name.into(),
            source,
        }
    }

    /// Create a thread join error
    #[must_use]
    pub fn thread_join(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ThreadJoin {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }
}
