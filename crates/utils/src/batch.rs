//! Bounded parallel execution of per-item work with ordered results
//!
//! Evaluation batches are independent per item, so they run on a fixed-size
//! pool of worker threads. Completion order is whatever the pool produces;
//! the returned sequence always matches input order.

use crossbeam::channel;
use evalrig_core::{Error, Result};
use std::thread;

use crate::tracing::progress::BatchProgressReporter;

/// Effective pool size for a batch: never more workers than items.
///
/// Small batches get fewer workers than the configured limit; an empty
/// batch gets none.
pub fn effective_worker_count(limit: usize, item_count: usize) -> usize {
    limit.min(item_count)
}

/// Runs a fallible function over a batch of items on a fixed-size worker pool.
///
/// Results come back in input order. The first item failure aborts the whole
/// batch; there is no partial-result mode and no retry.
pub struct BatchMapper {
    workers: usize,
    label: Option<String>,
}

impl BatchMapper {
    /// Create a mapper with the given worker limit
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            label: None,
        }
    }

    /// Attach a human-readable label to progress events
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Process every item and return the outputs in input order.
    ///
    /// At most `min(workers, items.len())` invocations of `process` run
    /// concurrently. Progress is reported once per completed invocation, in
    /// completion order. On the first item error the collector stops
    /// accepting results, the workers drain out, and the error is returned
    /// only after every worker thread has been joined, so no invocation
    /// keeps running past this call.
    pub fn run<I, O, F>(&self, items: Vec<I>, process: F) -> Result<Vec<O>>
    where
        I: Send,
        O: Send,
        F: Fn(I) -> Result<O> + Sync,
    {
        if self.workers == 0 {
            return Err(Error::configuration("worker limit must be positive"));
        }

        let total = items.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let workers = effective_worker_count(self.workers, total);
        let progress = BatchProgressReporter::new(total, self.label.clone());

        // The whole batch is queued up front; indices reconcile unordered
        // completion back to input order.
        let (task_tx, task_rx) = channel::unbounded();
        for task in items.into_iter().enumerate() {
            let _ = task_tx.send(task);
        }
        drop(task_tx);

        let (result_tx, result_rx) = channel::unbounded();

        thread::scope(|scope| {
            for _ in 0..workers {
                let task_rx = task_rx.clone();
                let result_tx = result_tx.clone();
                let process = &process;
                scope.spawn(move || {
                    for (index, item) in task_rx.iter() {
                        let outcome = process(item);
                        if result_tx.send((index, outcome)).is_err() {
                            // collector bailed out after a failure
                            break;
                        }
                    }
                });
            }
            drop(result_tx);
            drop(task_rx);

            let mut slots: Vec<Option<O>> = Vec::with_capacity(total);
            slots.resize_with(total, || None);

            let mut failure = None;
            while let Ok((index, outcome)) = result_rx.recv() {
                match outcome {
                    Ok(output) => {
                        slots[index] = Some(output);
                        progress.tick();
                    }
                    Err(error) => {
                        failure = Some(error);
                        break;
                    }
                }
            }
            // Dropping the receiver makes any still-running worker's next
            // send fail, so the pool drains instead of blocking.
            drop(result_rx);

            if let Some(error) = failure {
                return Err(error);
            }

            let outputs: Vec<O> = slots.into_iter().flatten().collect();
            if outputs.len() == total {
                Ok(outputs)
            } else {
                // Only reachable when a worker died mid-item; scope() then
                // re-raises that worker's panic once all threads are joined.
                Err(Error::configuration(
                    "worker pool shut down before the batch completed",
                ))
            }
        })
    }
}

/// One-shot convenience over [`BatchMapper`]
pub fn map_bounded<I, O, F>(items: Vec<I>, workers: usize, process: F) -> Result<Vec<O>>
where
    I: Send,
    O: Send,
    F: Fn(I) -> Result<O> + Sync,
{
    BatchMapper::new(workers).run(items, process)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[test]
    fn effective_worker_count_is_min_of_limit_and_items() {
        assert_eq!(effective_worker_count(8, 3), 3);
        assert_eq!(effective_worker_count(2, 10), 2);
        assert_eq!(effective_worker_count(4, 4), 4);
        assert_eq!(effective_worker_count(4, 0), 0);
    }

    #[test]
    fn results_keep_input_order_despite_jitter() {
        let items: Vec<usize> = (0..50).collect();
        let results = BatchMapper::new(8)
            .with_label("squares")
            .run(items, |n| {
                // later items finish earlier, so completion order differs
                // from input order
                thread::sleep(Duration::from_millis(((50 - n) % 7) as u64));
                Ok(n * n)
            })
            .unwrap();
        assert_eq!(results, (0..50).map(|n| n * n).collect::<Vec<_>>());
    }

    #[test]
    fn in_flight_invocations_never_exceed_the_limit() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let results = BatchMapper::new(3)
            .run((0..32).collect::<Vec<usize>>(), |n| {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(2));
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(n)
            })
            .unwrap();
        assert_eq!(results.len(), 32);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn small_batches_use_at_most_one_worker_per_item() {
        let seen_threads = Mutex::new(HashSet::new());
        let results = BatchMapper::new(8)
            .run(vec![1u32, 2], |n| {
                seen_threads
                    .lock()
                    .unwrap()
                    .insert(thread::current().id());
                Ok(n)
            })
            .unwrap();
        assert_eq!(results, vec![1, 2]);
        assert!(seen_threads.lock().unwrap().len() <= 2);
    }

    #[test]
    fn empty_batch_returns_empty_results() {
        let results = BatchMapper::new(4)
            .run(Vec::<u32>::new(), |n| Ok(n))
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn zero_worker_limit_is_a_configuration_error() {
        let result = BatchMapper::new(0).run(vec![1u32], |n| Ok(n));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn single_failing_item_aborts_the_batch() {
        let result = map_bounded((0..16).collect::<Vec<usize>>(), 4, |n| {
            if n == 7 {
                Err(Error::item_processing(7, "simulated model failure"))
            } else {
                Ok(n)
            }
        });
        match result {
            Err(Error::ItemProcessing { index, .. }) => assert_eq!(index, 7),
            other => panic!("expected an item processing failure, got {other:?}"),
        }
    }
}
