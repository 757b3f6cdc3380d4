//! Time sources and cancellation for the periodic workers.
//!
//! A [`Ticker`][crate::Ticker] never calls `std::thread::sleep` directly.  It
//! asks a [`Clock`] for the current time and to block until the next
//! deadline, so tests can substitute [`ManualClock`] and move time forward
//! explicitly.  Every wait is also interruptible through a [`CancelToken`].

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

// ── CancelToken ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct CancelState {
    cancelled: Mutex<bool>,
    wake:      Condvar,
}

/// Shared one-shot cancellation flag.
///
/// Clones observe the same flag.  Once cancelled it stays cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self) -> MutexGuard<'_, bool> {
        self.state.cancelled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raise the flag and wake every thread blocked in [`wait_timeout`].
    ///
    /// [`wait_timeout`]: CancelToken::wait_timeout
    pub fn cancel(&self) {
        *self.flag() = true;
        self.state.wake.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.flag()
    }

    /// Block for up to `timeout`, returning early if the token is cancelled.
    ///
    /// Returns `true` if the token is cancelled on return.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.flag();
        let (guard, _) = self
            .state
            .wake
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// A monotonic time source that can block until a deadline.
///
/// Times are offsets from the clock's own epoch, not wall-clock timestamps.
pub trait Clock: Send + Sync + 'static {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;

    /// Block until `now() >= deadline` or `cancel` fires.
    ///
    /// Returns `true` if the deadline was reached, `false` if cancelled.
    fn sleep_until(&self, deadline: Duration, cancel: &CancelToken) -> bool;
}

/// Real time, measured from the moment the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep_until(&self, deadline: Duration, cancel: &CancelToken) -> bool {
        loop {
            if cancel.is_cancelled() {
                return false;
            }
            let now = self.now();
            if now >= deadline {
                return true;
            }
            // Condvar waits may return early; loop re-checks both conditions.
            if cancel.wait_timeout(deadline - now) {
                return false;
            }
        }
    }
}

/// Virtual time that only moves when [`advance`][ManualClock::advance] or
/// [`set`][ManualClock::set] is called.
///
/// Sleepers wake on every change and re-check their deadline.  They also
/// poll the cancel token every [`ManualClock::POLL`] so shutdown does not
/// depend on time moving.
#[derive(Debug, Default)]
pub struct ManualClock {
    now:     Mutex<Duration>,
    changed: Condvar,
}

impl ManualClock {
    /// Upper bound on how long a sleeper goes without checking its token.
    pub const POLL: Duration = Duration::from_millis(2);

    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Duration> {
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move time forward by `by` and wake all sleepers.
    pub fn advance(&self, by: Duration) {
        *self.lock() += by;
        self.changed.notify_all();
    }

    /// Jump to an absolute time.  Moving backwards is ignored.
    pub fn set(&self, to: Duration) {
        {
            let mut now = self.lock();
            if to > *now {
                *now = to;
            }
        }
        self.changed.notify_all();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.lock()
    }

    fn sleep_until(&self, deadline: Duration, cancel: &CancelToken) -> bool {
        let mut now = self.lock();
        loop {
            if cancel.is_cancelled() {
                return false;
            }
            if *now >= deadline {
                return true;
            }
            now = self
                .changed
                .wait_timeout(now, Self::POLL)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}
