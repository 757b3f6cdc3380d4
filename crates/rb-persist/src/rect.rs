//! `Rect` and the `HasGeometry` capability.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A window's screen rectangle in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x:      i32,
    pub y:      i32,
    pub width:  i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// `false` if either dimension is negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width >= 0 && self.height >= 0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Anything whose rectangle should survive a restart.
///
/// `prefix` identifies the window in the saved layout and must be unique
/// among the windows passed to one [`GeometryLayout`][crate::GeometryLayout]
/// call.  The log window uses `"log"`, the coordinate window
/// `"coordinate"`.
pub trait HasGeometry {
    fn prefix(&self) -> &str;

    fn geometry(&self) -> Rect;

    fn set_geometry(&mut self, rect: Rect);
}
