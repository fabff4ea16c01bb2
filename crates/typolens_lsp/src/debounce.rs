//! Debouncing for decoration updates.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default debounce delay in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// A single-slot, last-write-wins task scheduler.
///
/// Scheduling cancels whatever is still waiting and starts a fresh delay.
/// Once the delay has elapsed the task runs detached, so a later
/// `schedule` or `cancel` never interrupts work that already started.
/// Two started tasks may therefore overlap; callers that need ordering
/// serialize the task body themselves.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Creates a debouncer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` to run after the delay, replacing any pending task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        });

        if let Some(previous) = self.pending.lock().replace(handle) {
            if !previous.is_finished() {
                debug!("Cancelling pending update");
            }
            previous.abort();
        }
    }

    /// Cancels the pending task, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    /// Returns true if a task is still waiting for its delay to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_default_delay() {
        assert_eq!(Debouncer::default().delay(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_only_last_task() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let runs = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let runs = runs.clone();
            debouncer.schedule(async move { runs.lock().push(i) });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(runs.lock().is_empty());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(*runs.lock(), vec![4]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_triggers_each_run() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = count.clone();
            debouncer.schedule(async move {
                count.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(700)).await;
        }

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_task() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        debouncer.schedule(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
