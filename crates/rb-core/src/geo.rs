//! Planar coordinate type and angle utilities.
//!
//! The simulated field is a flat screen-space plane: `x` grows to the right,
//! `y` grows downwards, and headings are measured in radians from the +x
//! axis.  All arithmetic is `f64`; the agent moves fractions of a unit per
//! tick and single precision would visibly drift over a long run.

use std::f64::consts::TAU;

/// A point on the simulation plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Heading from `self` towards `other`, normalized into `[0, 2π)`.
    #[inline]
    pub fn bearing_to(self, other: Point) -> f64 {
        normalize_radians((other.y - self.y).atan2(other.x - self.x))
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Map any finite angle into `[0, 2π)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `2π`, so that
/// case is folded back to `0`.  Non-finite input has no meaningful heading
/// and maps to `0`.
#[inline]
pub fn normalize_radians(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f64::clamp` this never panics when `min > max`; it returns one
/// of the two bounds instead.
#[inline]
pub fn apply_limits(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
