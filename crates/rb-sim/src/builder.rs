//! Fluent builder for starting a [`Simulator`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rb_core::SimConfig;
use rb_motion::{MotionLimits, MotionState, SharedMotion};
use rb_notify::{ChangeListener, ChangeNotifier};
use tracing::info;

use crate::{CancelToken, Clock, SimError, SimResult, Simulator, SystemClock, Ticker};

/// Thread name of the stepper worker.
pub const STEPPER_THREAD: &str = "rb-stepper";
/// Thread name of the redraw worker.
pub const REDRAW_THREAD: &str = "rb-redraw";

/// Fluent builder for [`Simulator<C>`].
///
/// Every input has a default:
///
/// | Method                 | Default                                   |
/// |------------------------|-------------------------------------------|
/// | `.clock(c)`            | `SystemClock::new()`                      |
/// | `.config(c)`           | `SimConfig::default()` (10 ms / 50 ms)    |
/// | `.limits(l)`           | `MotionLimits::default()`                 |
/// | `.initial_state(s)`    | `MotionState::default()`                  |
/// | `.listener(l)`         | none                                      |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimulatorBuilder::new()
///     .config(SimConfig { redraw_period_ms: None, ..SimConfig::default() })
///     .listener(Arc::new(|| println!("moved")))
///     .spawn()?;
/// sim.set_target(300, 200);
/// sim.shutdown()?;
/// ```
pub struct SimulatorBuilder<C: Clock = SystemClock> {
    clock:     Arc<C>,
    config:    SimConfig,
    limits:    MotionLimits,
    initial:   MotionState,
    listeners: Vec<Arc<dyn ChangeListener>>,
}

impl SimulatorBuilder<SystemClock> {
    pub fn new() -> Self {
        Self {
            clock:     Arc::new(SystemClock::new()),
            config:    SimConfig::default(),
            limits:    MotionLimits::default(),
            initial:   MotionState::default(),
            listeners: Vec::new(),
        }
    }
}

impl Default for SimulatorBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SimulatorBuilder<C> {
    /// Drive both workers from `clock` instead of real time.
    pub fn clock<D: Clock>(self, clock: Arc<D>) -> SimulatorBuilder<D> {
        SimulatorBuilder {
            clock,
            config:    self.config,
            limits:    self.limits,
            initial:   self.initial,
            listeners: self.listeners,
        }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn limits(mut self, limits: MotionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn initial_state(mut self, state: MotionState) -> Self {
        self.initial = state;
        self
    }

    /// Subscribe `listener` before the workers start, so it sees the first
    /// tick.
    pub fn listener(mut self, listener: Arc<dyn ChangeListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Validate the configuration and start the worker threads.
    ///
    /// Returns as soon as the threads are spawned.
    ///
    /// # Errors
    /// - [`SimError::Config`] if `config` or `limits` is invalid.
    /// - [`SimError::Spawn`] if the OS refuses a thread.  Any worker already
    ///   started is stopped before returning.
    pub fn spawn(self) -> SimResult<Simulator<C>> {
        self.config.validate()?;
        self.limits.validate()?;

        let notifier = Arc::new(ChangeNotifier::new());
        for listener in self.listeners {
            notifier.register(listener);
        }

        let mut sim = Simulator {
            motion:  Arc::new(SharedMotion::new(self.initial)),
            notifier,
            clock:   self.clock,
            config:  self.config,
            limits:  self.limits,
            cancel:  CancelToken::new(),
            steps:   Arc::new(AtomicU64::new(0)),
            workers: Vec::with_capacity(2),
        };

        // ── Stepper ───────────────────────────────────────────────────────
        let step_notifies = sim.config.redraw_period_ms.is_none();
        let stepper = {
            let motion = Arc::clone(&sim.motion);
            let notifier = Arc::clone(&sim.notifier);
            let steps = Arc::clone(&sim.steps);
            let limits = sim.limits;
            let dt_ms = sim.config.step_dt_ms;
            Ticker::new(STEPPER_THREAD, sim.config.step_period()).spawn(
                Arc::clone(&sim.clock),
                sim.cancel.clone(),
                move |_tick| {
                    let outcome = motion.advance(&limits, dt_ms);
                    if step_notifies && outcome.changed() {
                        notifier.broadcast();
                    }
                    steps.fetch_add(1, Ordering::AcqRel);
                },
            )
        };
        sim.workers.push(stepper.map_err(|source| SimError::Spawn {
            worker: STEPPER_THREAD,
            source,
        })?);

        // ── Redraw requester ──────────────────────────────────────────────
        if let Some(period) = sim.config.redraw_period() {
            let notifier = Arc::clone(&sim.notifier);
            let redraw = Ticker::new(REDRAW_THREAD, period).spawn(
                Arc::clone(&sim.clock),
                sim.cancel.clone(),
                move |_tick| notifier.broadcast(),
            );
            sim.workers.push(redraw.map_err(|source| SimError::Spawn {
                worker: REDRAW_THREAD,
                source,
            })?);
        }

        info!(
            step_period_ms = sim.config.step_period_ms,
            redraw_period_ms = ?sim.config.redraw_period_ms,
            step_dt_ms = sim.config.step_dt_ms,
            "simulator started"
        );
        Ok(sim)
    }
}
