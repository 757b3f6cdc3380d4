//! Simulation time model.
//!
//! # Design
//!
//! Time inside the simulator is a monotonically increasing `Tick` counter,
//! one per invocation of the stepper.  Wall-clock pacing lives in `SimConfig`:
//!
//!   step thread   fires every `step_period_ms`  and integrates `step_dt_ms`
//!   redraw thread fires every `redraw_period_ms` (optional)
//!
//! The integration step `step_dt_ms` is independent of the pacing period:
//! a tick delivered late still advances the model by exactly `step_dt_ms`.

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute tick counter.
///
/// Stored as `u64`: at the legacy 10 ms period a u64 lasts ~5.8 billion years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Pacing configuration for the simulator's two periodic activities.
///
/// Typically left at its defaults; the demo binary can load it from a JSON
/// file when the `serde` feature is enabled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Milliseconds between stepper ticks.  Default: 10.
    pub step_period_ms: u64,

    /// Milliseconds between redraw notifications.  `None` makes the stepper
    /// notify after every tick that moved the agent instead.  Default: 50.
    pub redraw_period_ms: Option<u64>,

    /// Simulated milliseconds integrated per tick.  Default: 10.0.
    pub step_dt_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_period_ms:   10,
            redraw_period_ms: Some(50),
            step_dt_ms:       10.0,
        }
    }
}

impl SimConfig {
    /// Stepper period as a `Duration`.
    #[inline]
    pub fn step_period(&self) -> Duration {
        Duration::from_millis(self.step_period_ms)
    }

    /// Redraw period as a `Duration`, if a separate redraw ticker is wanted.
    #[inline]
    pub fn redraw_period(&self) -> Option<Duration> {
        self.redraw_period_ms.map(Duration::from_millis)
    }

    /// Reject configurations that would spin a thread or stall the model.
    pub fn validate(&self) -> CoreResult<()> {
        if self.step_period_ms == 0 {
            return Err(CoreError::Config("step_period_ms must be greater than zero".into()));
        }
        if self.redraw_period_ms == Some(0) {
            return Err(CoreError::Config("redraw_period_ms must be greater than zero".into()));
        }
        if !self.step_dt_ms.is_finite() || self.step_dt_ms <= 0.0 {
            return Err(CoreError::Config(format!(
                "step_dt_ms must be a positive finite number, got {}",
                self.step_dt_ms
            )));
        }
        Ok(())
    }
}
