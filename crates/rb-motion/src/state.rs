//! Agent and target kinematic state.

use rb_core::{CoreError, CoreResult, Point};

/// The kinematic state of the single agent plus its current target.
///
/// `direction` is a heading in radians, always within `[0, 2π)` for any
/// state produced by [`step`][crate::step].  The target is integral because
/// it comes from a pointer click on a pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionState {
    pub position_x: f64,
    pub position_y: f64,
    pub direction:  f64,
    pub target_x:   i32,
    pub target_y:   i32,
}

impl MotionState {
    /// The agent's position as a [`Point`].
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.position_x, self.position_y)
    }

    /// The target as a [`Point`].
    #[inline]
    pub fn target(&self) -> Point {
        Point::from((self.target_x, self.target_y))
    }

    /// Straight-line distance from the agent to its target.
    #[inline]
    pub fn distance_to_target(&self) -> f64 {
        self.position().distance_to(self.target())
    }

    /// `true` when the agent is close enough to the target that `step`
    /// leaves it untouched.
    #[inline]
    pub fn is_at_rest(&self, limits: &MotionLimits) -> bool {
        self.distance_to_target() < limits.rest_radius
    }
}

impl Default for MotionState {
    /// Agent at `(100, 100)` facing +x, target at `(150, 100)`.
    fn default() -> Self {
        Self {
            position_x: 100.0,
            position_y: 100.0,
            direction:  0.0,
            target_x:   150,
            target_y:   100,
        }
    }
}

/// Speed limits applied on every step.
///
/// Velocities are per simulated millisecond, so one legacy 10 ms tick moves
/// the agent one unit and turns it by 0.01 rad.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionLimits {
    /// Linear speed cap, units per ms.  Default: 0.1.
    pub max_velocity: f64,

    /// Turn-rate cap, radians per ms.  Default: 0.001.
    pub max_angular_velocity: f64,

    /// Distance below which the agent is considered arrived.  Default: 0.5.
    pub rest_radius: f64,
}

impl Default for MotionLimits {
    fn default() -> Self {
        Self {
            max_velocity:         0.1,
            max_angular_velocity: 0.001,
            rest_radius:          0.5,
        }
    }
}

impl MotionLimits {
    /// Reject negative or non-finite limits.
    ///
    /// A zero `max_angular_velocity` is allowed: the agent then only ever
    /// drives straight.
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("max_velocity", self.max_velocity),
            ("max_angular_velocity", self.max_angular_velocity),
            ("rest_radius", self.rest_radius),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
