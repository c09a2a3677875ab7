// Tue Jan 20 2026 - Alex

use parking_lot::Mutex;
use std::thread;
use std::time::Duration;

pub type DelayedTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once after a delay. Scheduled tasks are never cancelled.
pub trait DelayScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: DelayedTask);
}

/// One detached sleeper thread per task. Volume is bounded by how fast a
/// person opens profiles, so nothing smarter is needed.
pub struct ThreadDelayScheduler;

impl DelayScheduler for ThreadDelayScheduler {
    fn schedule(&self, delay: Duration, task: DelayedTask) {
        let spawned = thread::Builder::new()
            .name("dexprobe-delay".to_string())
            .spawn(move || {
                thread::sleep(delay);
                task();
            });

        if let Err(e) = spawned {
            log::warn!("Could not spawn delay thread: {}", e);
        }
    }
}

/// Virtual clock. Tasks run only from `advance`, on the caller's thread.
#[derive(Default)]
pub struct ManualScheduler {
    now: Mutex<Duration>,
    pending: Mutex<Vec<(Duration, DelayedTask)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn now(&self) -> Duration {
        *self.now.lock()
    }

    /// Moves the clock forward and runs every task that came due, earliest
    /// first. Returns how many ran.
    pub fn advance(&self, by: Duration) -> usize {
        let now = {
            let mut now = self.now.lock();
            *now += by;
            *now
        };

        let mut due = {
            let mut pending = self.pending.lock();
            let (due, rest): (Vec<_>, Vec<_>) = pending.drain(..).partition(|(at, _)| *at <= now);
            *pending = rest;
            due
        };
        due.sort_by_key(|(at, _)| *at);

        let count = due.len();
        for (_, task) in due {
            task();
        }
        count
    }
}

impl DelayScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: DelayedTask) {
        let at = *self.now.lock() + delay;
        self.pending.lock().push((at, task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_manual_scheduler_runs_due_tasks_only() {
        let scheduler = ManualScheduler::new();
        let ran = Arc::new(AtomicUsize::new(0));

        let r = ran.clone();
        scheduler.schedule(Duration::from_millis(2000), Box::new(move || {
            r.fetch_add(1, Ordering::SeqCst);
        }));
        let r = ran.clone();
        scheduler.schedule(Duration::from_millis(5000), Box::new(move || {
            r.fetch_add(10, Ordering::SeqCst);
        }));

        assert_eq!(scheduler.advance(Duration::from_millis(1999)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.advance(Duration::from_secs(10)), 1);
        assert_eq!(ran.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn test_thread_scheduler_eventually_runs() {
        let (tx, rx) = std::sync::mpsc::channel();
        ThreadDelayScheduler.schedule(Duration::from_millis(10), Box::new(move || {
            tx.send(()).ok();
        }));

        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }
}
