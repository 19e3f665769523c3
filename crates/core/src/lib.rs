//! Core types, errors, and constants for the `evalrig` evaluation harness.
//!
//! This crate establishes the foundational building blocks shared by the
//! rest of the workspace:
//!
//! - **`errors`**: the primary `Error` enum and `Result` type alias,
//!   centralizing all failure modes so callers get predictable error
//!   handling across the harness.
//! - **`constants`**: shared static constants such as environment variable
//!   names and thread names.

pub mod constants;
pub mod errors;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt},
};
