//! Structured progress events for batch execution

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::info;

/// Minimum interval between progress events (in milliseconds)
const PROGRESS_THROTTLE_MS: u64 = 100;

/// Emits a throttled `tracing` event per completed work item.
///
/// Ticks arrive in completion order, which for a worker pool is not input
/// order; only the counts are meaningful. The first and final ticks always
/// emit, the ones in between are throttled.
pub struct BatchProgressReporter {
    label: Option<String>,
    total: usize,
    completed: AtomicUsize,
    last_emit_ms: AtomicU64,
    started: Instant,
}

impl BatchProgressReporter {
    /// Create a reporter for a batch of `total` items
    pub fn new(total: usize, label: Option<String>) -> Self {
        Self {
            label,
            total,
            completed: AtomicUsize::new(0),
            last_emit_ms: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Record one completed item
    pub fn tick(&self) {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        let finished = completed == self.total;
        if !finished && completed != 1 && !self.should_emit() {
            return;
        }

        let label = self.label.as_deref().unwrap_or("batch");
        if finished {
            info!(
                label = %label,
                completed = %completed,
                total = %self.total,
                elapsed = %format_duration(self.started.elapsed()),
                "batch_complete"
            );
        } else {
            info!(
                label = %label,
                completed = %completed,
                total = %self.total,
                "batch_progress"
            );
        }
    }

    /// Number of items recorded so far
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    // Millisecond granularity is plenty for display throttling
    fn should_emit(&self) -> bool {
        let now = self.started.elapsed().as_millis() as u64;
        let last = self.last_emit_ms.load(Ordering::Relaxed);
        if now.saturating_sub(last) >= PROGRESS_THROTTLE_MS {
            self.last_emit_ms.store(now, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}

/// Format a duration for display
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs == 0 {
        format!("{millis}ms")
    } else if total_secs < 60 {
        format!("{}.{}s", total_secs, millis / 100)
    } else {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{mins}m{secs}s")
    }
}
