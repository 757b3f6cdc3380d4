//! The running `Simulator` and its worker threads.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;

use rb_core::{ListenerId, SimConfig};
use rb_motion::{MotionLimits, MotionState, SharedMotion};
use rb_notify::{ChangeListener, ChangeNotifier};
use tracing::{debug, info, warn};

use crate::{CancelToken, Clock, SimError, SimResult, SystemClock};

/// A motion simulation running on background threads.
///
/// Two periodic workers share one [`SharedMotion`]:
///
/// | Thread       | Period                      | Work                                   |
/// |--------------|-----------------------------|----------------------------------------|
/// | `rb-stepper` | `config.step_period_ms`     | `SharedMotion::advance` by `step_dt_ms` |
/// | `rb-redraw`  | `config.redraw_period_ms`   | `broadcast()` to subscribers           |
///
/// When `redraw_period_ms` is `None` there is no redraw thread.  The stepper
/// then broadcasts after every tick that moved the agent, and
/// [`set_target`][Simulator::set_target] broadcasts as well.
///
/// Subscribers are called on whichever thread broadcasts.  A UI listener
/// must hand the work to its own thread.
///
/// Create via [`SimulatorBuilder`][crate::SimulatorBuilder].  Stop with
/// [`shutdown`][Simulator::shutdown]; dropping the simulator also stops and
/// joins the workers but discards any panic they raised.
pub struct Simulator<C: Clock = SystemClock> {
    pub(crate) motion:   Arc<SharedMotion>,
    pub(crate) notifier: Arc<ChangeNotifier>,
    pub(crate) clock:    Arc<C>,
    pub(crate) config:   SimConfig,
    pub(crate) limits:   MotionLimits,
    pub(crate) cancel:   CancelToken,
    pub(crate) steps:    Arc<AtomicU64>,
    pub(crate) workers:  Vec<JoinHandle<()>>,
}

impl<C: Clock> Simulator<C> {
    // ── Control ───────────────────────────────────────────────────────────

    /// Point the agent at `(x, y)`.  Callable from any thread.
    pub fn set_target(&self, x: i32, y: i32) {
        self.motion.set_target(x, y);
        debug!(x, y, "target updated");
        if self.config.redraw_period_ms.is_none() {
            self.notifier.broadcast();
        }
    }

    /// Be told when the motion state may have changed.
    pub fn subscribe(&self, listener: Arc<dyn ChangeListener>) -> ListenerId {
        self.notifier.register(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.notifier.unregister(id)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// The published state, for lock-free reads from any thread.
    pub fn motion(&self) -> &Arc<SharedMotion> {
        &self.motion
    }

    /// Current state as a plain value.  See [`SharedMotion::load`].
    pub fn snapshot(&self) -> MotionState {
        self.motion.load()
    }

    /// Number of stepper ticks completed so far.
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn limits(&self) -> &MotionLimits {
        &self.limits
    }

    pub fn clock(&self) -> &Arc<C> {
        &self.clock
    }

    // ── Shutdown ──────────────────────────────────────────────────────────

    /// Cancel both workers and wait for them to exit.
    ///
    /// # Errors
    /// [`SimError::WorkerPanicked`] if a worker died from a panic, typically
    /// one raised by a subscriber.  The remaining workers are still joined.
    pub fn shutdown(mut self) -> SimResult<()> {
        self.stop()
    }

    fn stop(&mut self) -> SimResult<()> {
        if self.workers.is_empty() {
            return Ok(());
        }
        self.cancel.cancel();

        let mut first_error = None;
        for handle in self.workers.drain(..) {
            let worker = handle.thread().name().unwrap_or("unnamed").to_owned();
            if let Err(payload) = handle.join() {
                let err = SimError::WorkerPanicked {
                    worker,
                    message: panic_message(payload.as_ref()),
                };
                first_error.get_or_insert(err);
            }
        }
        info!(steps = self.steps(), "simulator stopped");

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<C: Clock> Drop for Simulator<C> {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(%err, "simulator worker failed");
        }
    }
}

impl<C: Clock> std::fmt::Debug for Simulator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("config", &self.config)
            .field("limits", &self.limits)
            .field("state", &self.snapshot())
            .field("steps", &self.steps())
            .field("workers", &self.workers.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
