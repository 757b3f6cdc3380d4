//! The pure steering and integration step.

use std::f64::consts::PI;

use rb_core::{apply_limits, normalize_radians};

use crate::{MotionLimits, MotionState};

/// Below this turn rate the arc solution divides by (almost) zero.
const OMEGA_EPSILON: f64 = 1e-12;

/// Advance `state` by `dt_ms` simulated milliseconds.
///
/// Returns the input unchanged (bit-for-bit) when the agent is within
/// `limits.rest_radius` of its target.  Otherwise the agent moves at full
/// speed along a constant-curvature arc, turning at full rate towards the
/// target side.  The target fields are carried through untouched.
///
/// Never produces a non-finite coordinate from finite input: when the arc
/// formula is singular or overflows, the affected coordinate is integrated
/// along a straight line instead.
pub fn step(state: &MotionState, limits: &MotionLimits, dt_ms: f64) -> MotionState {
    if state.is_at_rest(limits) {
        return *state;
    }

    let velocity = apply_limits(limits.max_velocity, 0.0, limits.max_velocity);
    let angular_velocity = apply_limits(
        turn_rate(state, limits.max_angular_velocity),
        -limits.max_angular_velocity,
        limits.max_angular_velocity,
    );

    let (x, y, theta) = (state.position_x, state.position_y, state.direction);
    let turned = theta + angular_velocity * dt_ms;

    let (arc_x, arc_y) = if angular_velocity.abs() < OMEGA_EPSILON {
        (f64::NAN, f64::NAN)
    } else {
        let radius = velocity / angular_velocity;
        (
            x + radius * (turned.sin() - theta.sin()),
            y - radius * (turned.cos() - theta.cos()),
        )
    };

    let position_x = if arc_x.is_finite() {
        arc_x
    } else {
        x + velocity * dt_ms * theta.cos()
    };
    let position_y = if arc_y.is_finite() {
        arc_y
    } else {
        y + velocity * dt_ms * theta.sin()
    };

    MotionState {
        position_x,
        position_y,
        direction: normalize_radians(turned),
        ..*state
    }
}

/// Bang-bang turn decision: full positive rate when the target lies less
/// than half a turn counter-clockwise of the heading, full negative rate
/// otherwise.  The comparison is strict, so a target exactly behind the
/// agent turns it negative.
fn turn_rate(state: &MotionState, max_angular_velocity: f64) -> f64 {
    let bearing = state.position().bearing_to(state.target());
    let difference = normalize_radians(bearing - state.direction);
    if difference < PI {
        max_angular_velocity
    } else {
        -max_angular_velocity
    }
}
