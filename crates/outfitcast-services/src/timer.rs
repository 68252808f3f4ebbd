//! Cancellable deferred tasks.
//!
//! A [`TimerSlot`] holds at most one pending task. Arming it again cancels
//! the previous task first, so timers are replaced rather than accumulated.
//! Cancellation covers both the wait and a task that is already running.
//! Cancelling is idempotent.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct TimerSlot {
    current: Mutex<Option<CancellationToken>>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay` unless cancelled or re-armed first. A task
    /// still running when the slot is cancelled or re-armed is dropped at its
    /// next await point.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&self, delay: Duration, task: F) -> CancellationToken
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        if let Some(previous) = self.current.lock().replace(token.clone()) {
            previous.cancel();
        }

        let guard = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = guard.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            tokio::select! {
                biased;
                _ = guard.cancelled() => {}
                _ = task => {}
            }
            guard.cancel();
        });

        token
    }

    /// Cancel the pending task, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
        }
    }

    /// True while a task is waiting to fire or still running.
    pub fn is_armed(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A [`TimerSlot`] with a fixed delay.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    slot: TimerSlot,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: TimerSlot::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Defer `task` until calls have been quiet for the delay.
    pub fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.slot.arm(self.delay, task);
    }

    pub fn cancel(&self) {
        self.slot.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_armed()
    }
}
