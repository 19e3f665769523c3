//! Registry of long-lived background threads joined at shutdown
//!
//! Threads that outlive a single batch (result writers, watchers started by
//! the harness) are registered at spawn so shutdown can wait for them. The
//! calling thread itself is the one handle [`join_all`] must never join.

use evalrig_core::{Error, Result};
use once_cell::sync::Lazy;
use std::any::Any;
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

struct RegisteredThread {
    name: String,
    handle: JoinHandle<()>,
}

static THREAD_REGISTRY: Lazy<Mutex<Vec<RegisteredThread>>> =
    Lazy::new(|| Mutex::new(Vec::new()));

/// Spawn a named thread and keep its handle for [`join_all`]
pub fn spawn_registered<F>(name: impl Into<String>, task: F) -> Result<()>
where
    F: FnOnce() + Send + 'static,
{
    let name = name.into();
    let handle = thread::Builder::new()
        .name(name.clone())
        .spawn(task)
        .map_err(|e| Error::thread_spawn(name.clone(), e))?;

    match THREAD_REGISTRY.lock() {
        Ok(mut registry) => registry.push(RegisteredThread { name, handle }),
        // the thread still runs; it just won't be waited for at shutdown
        Err(e) => log::error!("failed to lock thread registry: {e}"),
    }
    Ok(())
}

/// Join every registered thread.
///
/// A handle belonging to the calling thread is skipped and stays
/// registered, since joining it would deadlock. That is the only suppressed
/// case: a panicked thread surfaces as a join error carrying the thread
/// name and panic text, after all remaining handles have been joined.
pub fn join_all() -> Result<()> {
    let drained: Vec<RegisteredThread> = match THREAD_REGISTRY.lock() {
        Ok(mut registry) => registry.drain(..).collect(),
        Err(e) => {
            return Err(Error::configuration(format!(
                "failed to lock thread registry: {e}"
            )))
        }
    };

    let current = thread::current().id();
    let mut kept = Vec::new();
    let mut first_failure = None;

    for entry in drained {
        if entry.handle.thread().id() == current {
            kept.push(entry);
            continue;
        }
        if let Err(payload) = entry.handle.join() {
            if first_failure.is_none() {
                first_failure = Some(Error::thread_join(entry.name, panic_message(payload.as_ref())));
            }
        }
    }

    if !kept.is_empty() {
        if let Ok(mut registry) = THREAD_REGISTRY.lock() {
            registry.append(&mut kept);
        }
    }

    match first_failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "thread panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    #[test]
    #[serial]
    fn joins_every_registered_thread() {
        let done = Arc::new(AtomicUsize::new(0));
        for i in 0..3 {
            let done = Arc::clone(&done);
            spawn_registered(format!("worker-{i}"), move || {
                done.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }

        join_all().unwrap();
        assert_eq!(done.load(Ordering::SeqCst), 3);
    }

    #[test]
    #[serial]
    fn panicked_thread_surfaces_as_a_join_error() {
        spawn_registered("exploding", || panic!("boom")).unwrap();

        let error = join_all().unwrap_err();
        match error {
            Error::ThreadJoin { name, message } => {
                assert_eq!(name, "exploding");
                assert!(message.contains("boom"));
            }
            other => panic!("expected a thread join error, got {other}"),
        }
    }

    #[test]
    #[serial]
    fn the_calling_thread_is_skipped_not_joined() {
        let ready = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        let wait_for_registration = Arc::clone(&ready);
        spawn_registered("self-joiner", move || {
            // wait until our own handle is in the registry, then prove that
            // join_all skips it instead of deadlocking
            while !wait_for_registration.load(Ordering::SeqCst) {
                thread::sleep(Duration::from_millis(1));
            }
            tx.send(join_all()).unwrap();
        })
        .unwrap();
        ready.store(true, Ordering::SeqCst);

        rx.recv().unwrap().unwrap();
        // the skipped handle stayed registered; now join it from outside
        join_all().unwrap();
    }
}
