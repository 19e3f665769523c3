//! Shared runtime utilities for the evalrig evaluation harness
//!
//! This crate carries the plumbing the harness leans on while it evaluates
//! models: bounded parallel execution of per-item work with ordered results,
//! termination-time cleanup that survives signals and normal process exit,
//! a registry of long-lived background threads joined at shutdown, and the
//! small path and sizing helpers around them.

pub mod batch;
#[cfg(unix)]
pub mod cleanup;
pub mod limits;
pub mod paths;
pub mod threads;
pub mod tracing;

pub use batch::*;
#[cfg(unix)]
pub use cleanup::*;
pub use limits::*;
pub use paths::*;
pub use threads::*;
pub use tracing::*;
