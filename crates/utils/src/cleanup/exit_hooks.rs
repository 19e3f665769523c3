//! Process-exit hook registry behind a single `libc::atexit` trampoline

use evalrig_core::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub(crate) type ExitAction = Arc<dyn Fn() + Send + Sync>;

/// Global registry of actions to run at normal process exit
static EXIT_HOOKS: Lazy<Mutex<ExitHookRegistry>> =
    Lazy::new(|| Mutex::new(ExitHookRegistry::new()));

struct ExitHook {
    description: String,
    action: ExitAction,
}

struct ExitHookRegistry {
    hooks: BTreeMap<u64, ExitHook>,
    next_id: u64,
    trampoline_installed: bool,
}

impl ExitHookRegistry {
    fn new() -> Self {
        Self {
            hooks: BTreeMap::new(),
            next_id: 0,
            trampoline_installed: false,
        }
    }

    fn insert(&mut self, description: String, action: ExitAction) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.hooks.insert(id, ExitHook { description, action });
        id
    }

}

/// Register `action` to run at normal process exit.
///
/// The first registration installs the `atexit` trampoline; later ones
/// reuse it. Returns an id for [`unregister`].
pub(crate) fn register(description: impl Into<String>, action: ExitAction) -> Result<u64> {
    let mut registry = EXIT_HOOKS
        .lock()
        .map_err(|e| Error::configuration(format!("failed to lock exit hook registry: {e}")))?;

    if !registry.trampoline_installed {
        // SAFETY: `run_exit_hooks` is an `extern "C" fn` that never unwinds
        let rc = unsafe { libc::atexit(run_exit_hooks) };
        if rc != 0 {
            return Err(Error::configuration("failed to install process exit hook"));
        }
        registry.trampoline_installed = true;
    }

    Ok(registry.insert(description.into(), action))
}

/// Remove a hook registered with [`register`]
pub(crate) fn unregister(id: u64) {
    match EXIT_HOOKS.lock() {
        Ok(mut registry) => {
            registry.hooks.remove(&id);
        }
        Err(e) => log::error!("failed to lock exit hook registry for unregister: {e}"),
    }
}

extern "C" fn run_exit_hooks() {
    // Hooks are taken out before any of them runs: the lock must not be
    // held while a hook executes (one that re-enters the registry or exits
    // again would deadlock), and draining means the exit path invokes each
    // hook at most once.
    let hooks = match EXIT_HOOKS.lock() {
        Ok(mut registry) => std::mem::take(&mut registry.hooks),
        Err(_) => return,
    };
    for hook in hooks.into_values() {
        log::debug!("running exit hook: {}", hook.description);
        (hook.action)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    #[serial]
    fn hooks_run_at_most_once_through_the_exit_path() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let _id = register("test hook", Arc::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        run_exit_hooks();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // drained on the first pass
        run_exit_hooks();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[serial]
    fn unregistered_hooks_do_not_run() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let id = register("test hook", Arc::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        unregister(id);
        run_exit_hooks();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
