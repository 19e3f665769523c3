//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            Error::Configuration {
                message: format!("{}: {}", message.into(), base_error),
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let base_error = e.into();
            Error::Configuration {
                message: format!("{}: {}", f(), base_error),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io;

    #[test]
    fn context_wraps_the_underlying_error() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing prompts file"));
        let error = result.context("loading prompts").unwrap_err();
        let rendered = error.to_string();
        assert!(rendered.contains("loading prompts"));
        assert!(rendered.contains("missing prompts file"));
    }

    #[test]
    fn with_context_is_lazy_on_success() {
        let called = Cell::new(false);
        let value = std::result::Result::<i32, io::Error>::Ok(5)
            .with_context(|| {
                called.set(true);
                "never rendered".to_string()
            })
            .unwrap();
        assert_eq!(value, 5);
        assert!(!called.get());
    }
}
