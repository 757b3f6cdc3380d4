//! Headless stand-ins for the desktop windows.
//!
//! Each one keeps a rectangle so the geometry store has something to save,
//! and the coordinate window re-reads the published motion state whenever
//! the simulator broadcasts.

use std::sync::{Arc, Mutex, PoisonError};

use rb_log::LogSource;
use rb_motion::SharedMotion;
use rb_notify::ChangeListener;
use rb_persist::{HasGeometry, Rect};

// ── Coordinate readout ────────────────────────────────────────────────────────

/// The text the coordinate window would paint.
pub struct CoordinateReadout {
    motion: Arc<SharedMotion>,
    text:   Mutex<String>,
}

impl CoordinateReadout {
    pub fn new(motion: Arc<SharedMotion>) -> Self {
        let readout = Self { motion, text: Mutex::new(String::new()) };
        readout.on_changed();
        readout
    }

    pub fn text(&self) -> String {
        self.text.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ChangeListener for CoordinateReadout {
    fn on_changed(&self) {
        let s = self.motion.load();
        let line = format!(
            "target ({}, {})  robot ({:.2}, {:.2})  heading {:.3} rad",
            s.target_x, s.target_y, s.position_x, s.position_y, s.direction
        );
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = line;
    }
}

// ── Windows ───────────────────────────────────────────────────────────────────

pub struct CoordinateWindow {
    pub rect:    Rect,
    pub readout: Arc<CoordinateReadout>,
}

impl HasGeometry for CoordinateWindow {
    fn prefix(&self) -> &str {
        "coordinate"
    }

    fn geometry(&self) -> Rect {
        self.rect
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

pub struct LogWindow {
    pub rect:   Rect,
    pub source: Arc<LogSource>,
}

impl LogWindow {
    /// Lines the window would show, newest last.
    pub fn visible_lines(&self, rows: usize) -> Vec<String> {
        let start = self.source.len().saturating_sub(rows);
        self.source.range(start, rows).iter().map(ToString::to_string).collect()
    }
}

impl HasGeometry for LogWindow {
    fn prefix(&self) -> &str {
        "log"
    }

    fn geometry(&self) -> Rect {
        self.rect
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

/// The application frame hosting the other windows.
pub struct MainWindow {
    pub rect: Rect,
}

impl HasGeometry for MainWindow {
    fn prefix(&self) -> &str {
        "main"
    }

    fn geometry(&self) -> Rect {
        self.rect
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }
}
