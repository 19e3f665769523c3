//! Termination-time cleanup for guarded regions of work
//!
//! While a model is loaded, the harness owes the rest of the system an
//! unload no matter how the process goes away. [`TerminationGuard`] brackets
//! that window: arming installs the cleanup action behind SIGINT, SIGTERM,
//! and a normal-exit hook; disarming (explicit or on drop) removes all
//! three registrations again.
//!
//! Signals are never handled in a signal trap. A dedicated watcher thread
//! consumes them through `signal_hook`'s iterator and runs the cleanup
//! action as ordinary code before the default termination behavior is
//! re-raised.

mod exit_hooks;
mod guard;

pub use guard::TerminationGuard;
