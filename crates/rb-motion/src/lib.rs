//! `rb-motion` — agent kinematics for the robots simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`state`]   | `MotionState`, `MotionLimits` — plain values, freely copyable     |
//! | [`step`]    | `step` — the pure steering/integration function                   |
//! | [`shared`]  | `SharedMotion` — per-field atomics read concurrently by observers |
//!
//! # Movement model (bang-bang steering on a constant-curvature arc)
//!
//! Every tick the agent drives at full speed and turns at full angular
//! velocity towards whichever side the target lies on:
//!
//! 1. Within `rest_radius` of the target the agent does not move at all.
//! 2. Otherwise the bearing to the target is compared with the heading; a
//!    forward difference below π turns positive, anything else negative.
//! 3. Position is integrated along the exact arc for constant `(v, ω)`,
//!    falling back to a straight line when `ω` is (numerically) zero.
//!
//! `step` has no side effects.  The stepper thread in `rb-sim` loads a
//! `MotionState` from [`SharedMotion`], calls `step`, and publishes the
//! result back.

pub mod shared;
pub mod state;
pub mod step;


pub use shared::{SharedMotion, StepOutcome};
pub use state::{MotionLimits, MotionState};
pub use step::step;
