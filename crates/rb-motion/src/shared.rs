//! `SharedMotion` — the published, concurrently readable motion state.
//!
//! # Concurrency model
//!
//! Each field lives in its own atomic.  `f64` fields are stored as their bit
//! pattern in an `AtomicU64`, so a reader always sees one complete value that
//! some writer stored — never a torn mix of two.  There is exactly one writer
//! per field group:
//!
//! | Fields                       | Writer                               |
//! |------------------------------|--------------------------------------|
//! | position, direction          | the stepper, via [`SharedMotion::advance`] |
//! | target                       | whoever calls [`SharedMotion::set_target`] |
//!
//! No lock is taken anywhere.  The fields are *not* published as one unit:
//! a reader may observe a new `position_x` with the previous `position_y`,
//! and `set_target` writes X and Y independently.

use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};

use tracing::debug;

use crate::{MotionLimits, MotionState, step};

/// What one call to [`SharedMotion::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent moved and is still outside the rest radius.
    Moved,
    /// The agent moved and is now inside the rest radius.
    Arrived,
    /// The agent was already at rest; nothing was published.
    Resting,
}

impl StepOutcome {
    /// `true` if observers should be told the state changed.
    #[inline]
    pub fn changed(self) -> bool {
        !matches!(self, StepOutcome::Resting)
    }
}

/// Lock-free published copy of a [`MotionState`].
#[derive(Debug)]
pub struct SharedMotion {
    position_x: AtomicU64,
    position_y: AtomicU64,
    direction:  AtomicU64,
    target_x:   AtomicI32,
    target_y:   AtomicI32,
}

impl SharedMotion {
    /// Publish `initial` as the starting state.
    pub fn new(initial: MotionState) -> Self {
        Self {
            position_x: AtomicU64::new(initial.position_x.to_bits()),
            position_y: AtomicU64::new(initial.position_y.to_bits()),
            direction:  AtomicU64::new(initial.direction.to_bits()),
            target_x:   AtomicI32::new(initial.target_x),
            target_y:   AtomicI32::new(initial.target_y),
        }
    }

    // ── Readers ───────────────────────────────────────────────────────────

    #[inline]
    pub fn position_x(&self) -> f64 {
        f64::from_bits(self.position_x.load(Ordering::Acquire))
    }

    #[inline]
    pub fn position_y(&self) -> f64 {
        f64::from_bits(self.position_y.load(Ordering::Acquire))
    }

    /// Heading in radians, within `[0, 2π)`.
    #[inline]
    pub fn direction(&self) -> f64 {
        f64::from_bits(self.direction.load(Ordering::Acquire))
    }

    #[inline]
    pub fn target_x(&self) -> i32 {
        self.target_x.load(Ordering::Acquire)
    }

    #[inline]
    pub fn target_y(&self) -> i32 {
        self.target_y.load(Ordering::Acquire)
    }

    /// Read every field into a plain [`MotionState`].
    ///
    /// Each field is individually consistent; the set as a whole may straddle
    /// a concurrent publish (see the module docs).
    pub fn load(&self) -> MotionState {
        MotionState {
            position_x: self.position_x(),
            position_y: self.position_y(),
            direction:  self.direction(),
            target_x:   self.target_x(),
            target_y:   self.target_y(),
        }
    }

    // ── Writers ───────────────────────────────────────────────────────────

    /// Overwrite the target.  Callable from any thread at any time; the last
    /// write to each coordinate wins.
    pub fn set_target(&self, x: i32, y: i32) {
        self.target_x.store(x, Ordering::Release);
        self.target_y.store(y, Ordering::Release);
    }

    /// Publish position and direction from `state`.  The target fields of
    /// `state` are ignored so a concurrent `set_target` is never clobbered.
    fn publish(&self, state: &MotionState) {
        self.position_x.store(state.position_x.to_bits(), Ordering::Release);
        self.position_y.store(state.position_y.to_bits(), Ordering::Release);
        self.direction.store(state.direction.to_bits(), Ordering::Release);
    }

    /// Load, [`step`], and publish.  Must only be called from one thread at a
    /// time (the stepper); readers and `set_target` may run concurrently.
    pub fn advance(&self, limits: &MotionLimits, dt_ms: f64) -> StepOutcome {
        let current = self.load();
        if current.is_at_rest(limits) {
            return StepOutcome::Resting;
        }

        let next = step(&current, limits, dt_ms);
        self.publish(&next);

        if next.is_at_rest(limits) {
            debug!(
                x = next.position_x,
                y = next.position_y,
                target_x = next.target_x,
                target_y = next.target_y,
                "agent reached target"
            );
            StepOutcome::Arrived
        } else {
            StepOutcome::Moved
        }
    }
}

impl Default for SharedMotion {
    fn default() -> Self {
        Self::new(MotionState::default())
    }
}
