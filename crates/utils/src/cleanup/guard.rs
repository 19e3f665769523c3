//! Scoped installation of termination-signal handling and an exit hook

use evalrig_core::{Error, Result, TERMINATION_WATCHER_THREAD};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::backend::Handle;
use signal_hook::iterator::Signals;
use signal_hook::low_level;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::exit_hooks;

/// Guards a region of work with a termination-time cleanup action.
///
/// While the guard is armed, SIGINT or SIGTERM runs the cleanup action on a
/// dedicated watcher thread and then re-raises the signal's default
/// termination behavior, so a signal death never also takes the exit-hook
/// path. A normal process exit while armed runs the action through the
/// exit-hook registry instead. Dropping the guard, whether the region
/// returned normally or unwound, unregisters the exit hook, removes the
/// signal subscriptions, and joins the watcher, leaving no registration
/// behind.
///
/// The cleanup action must be idempotent. The guard invokes it once per
/// delivered termination event and performs no de-duplication of its own.
///
/// Arming is not re-entrant: one guard at a time, from a single call site,
/// is the supported configuration.
pub struct TerminationGuard {
    hook_id: Option<u64>,
    signals: Option<Handle>,
    watcher: Option<JoinHandle<()>>,
}

impl TerminationGuard {
    /// Arm the guard for SIGINT and SIGTERM.
    ///
    /// The description shows up in exit-hook logging; the cleanup action is
    /// typically the model unload handed over by the model runtime.
    pub fn arm<F>(description: impl Into<String>, cleanup: F) -> Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::arm_for_signals(&[SIGINT, SIGTERM], description, cleanup, true)
    }

    /// Arm for an arbitrary signal set.
    ///
    /// `terminate` controls whether the watcher re-raises the signal's
    /// default behavior after the cleanup action; production arming always
    /// terminates, tests arm user signals without it.
    fn arm_for_signals<F>(
        signals: &[i32],
        description: impl Into<String>,
        cleanup: F,
        terminate: bool,
    ) -> Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let cleanup: Arc<dyn Fn() + Send + Sync> = Arc::new(cleanup);

        let hook_id = exit_hooks::register(description, Arc::clone(&cleanup))?;

        let signal_source = match Signals::new(signals) {
            Ok(source) => source,
            Err(error) => {
                exit_hooks::unregister(hook_id);
                return Err(Error::signal("subscription", error));
            }
        };
        let handle = signal_source.handle();

        let action = Arc::clone(&cleanup);
        let watcher = thread::Builder::new()
            .name(TERMINATION_WATCHER_THREAD.to_string())
            .spawn(move || watch(signal_source, action, terminate));
        let watcher = match watcher {
            Ok(watcher) => watcher,
            Err(error) => {
                // the closure owning the signal source was dropped, which
                // already removed the subscriptions
                exit_hooks::unregister(hook_id);
                return Err(Error::thread_spawn(TERMINATION_WATCHER_THREAD, error));
            }
        };

        Ok(Self {
            hook_id: Some(hook_id),
            signals: Some(handle),
            watcher: Some(watcher),
        })
    }

    /// Explicitly disarm the guard. Equivalent to dropping it.
    pub fn disarm(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.hook_id.take() {
            exit_hooks::unregister(id);
        }
        if let Some(handle) = self.signals.take() {
            handle.close();
        }
        if let Some(watcher) = self.watcher.take() {
            if watcher.join().is_err() {
                log::error!("termination watcher thread panicked");
            }
        }
    }
}

impl Drop for TerminationGuard {
    fn drop(&mut self) {
        self.release();
    }
}

fn watch(mut signals: Signals, action: Arc<dyn Fn() + Send + Sync>, terminate: bool) {
    for signal in signals.forever() {
        log::info!("received signal {signal}, running termination cleanup");
        action();
        if terminate {
            if let Err(error) = low_level::emulate_default_handler(signal) {
                log::error!("failed to re-raise signal {signal}: {error}");
            }
        }
    }
}
