//! `Ticker` — periodic callback on a named thread.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rb_core::Tick;

use crate::{CancelToken, Clock};

/// Calls a closure once per `period` until cancelled.
///
/// Tick 0 fires immediately.  Each later tick is due one `period` after the
/// previous one was due, or after it actually fired if that was later.  A
/// stall of the worker thread therefore delays the following ticks instead
/// of replaying the missed ones.
#[derive(Clone, Debug)]
pub struct Ticker {
    name:   String,
    period: Duration,
}

impl Ticker {
    pub fn new(name: impl Into<String>, period: Duration) -> Self {
        Self { name: name.into(), period }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run on the calling thread until `cancel` fires.
    ///
    /// Returns the number of ticks delivered.
    pub fn run<C, F>(&self, clock: &C, cancel: &CancelToken, mut on_tick: F) -> u64
    where
        C: Clock + ?Sized,
        F: FnMut(Tick),
    {
        let mut deadline = clock.now();
        let mut tick = Tick::ZERO;
        while !cancel.is_cancelled() {
            on_tick(tick);
            tick = tick + 1;
            deadline += self.period;
            if !clock.sleep_until(deadline, cancel) {
                break;
            }
            // Woken late: measure the next period from now.
            deadline = deadline.max(clock.now());
        }
        tick.0
    }

    /// Run on a new thread named after this ticker.
    ///
    /// The thread exits once `cancel` fires; join the handle to wait for it.
    pub fn spawn<C, F>(
        self,
        clock:   Arc<C>,
        cancel:  CancelToken,
        on_tick: F,
    ) -> io::Result<JoinHandle<()>>
    where
        C: Clock,
        F: FnMut(Tick) + Send + 'static,
    {
        thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || {
                self.run(clock.as_ref(), &cancel, on_tick);
            })
    }
}
