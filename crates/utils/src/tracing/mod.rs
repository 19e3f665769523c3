//! Tracing setup and structured progress events for the harness

use evalrig_core::{Error, Result, EVALRIG_LOG_VAR};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod progress;

pub use progress::{format_duration, BatchProgressReporter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Initialize the tracing system.
///
/// The filter comes from `EVALRIG_LOG`, defaulting to `info`. Output goes
/// to stderr so harness stdout stays machine-readable; ANSI colors are only
/// used when stderr is a TTY.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_env(EVALRIG_LOG_VAR)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| Error::configuration(format!("invalid {EVALRIG_LOG_VAR} filter: {e}")))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::configuration(format!("failed to initialize tracing: {e}")))
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
