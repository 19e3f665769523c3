//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for evalrig operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for evalrig operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Misconfiguration of a pool, guard, or subscriber
    Configuration { message: String },

    /// Environment variable related errors
    Environment { variable: String, message: String },

    /// A processing function failed for a single work item
    ItemProcessing {
        index: usize,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Signal subscription errors
    Signal {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Background thread spawn errors
    ThreadSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Background thread join errors
    ThreadJoin { name: String, message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}
