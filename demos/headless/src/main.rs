//! headless — the robots simulator without a GUI.
//!
//! Restores window geometry, starts the simulator, plays back a few target
//! "clicks" from another thread while printing the coordinate readout, then
//! saves the geometry and dumps the diagnostic log.
//!
//! ```text
//! cargo run -p headless                 # defaults
//! cargo run -p headless -- run.json     # HeadlessConfig as JSON
//! RUST_LOG=debug cargo run -p headless  # include target/arrival events
//! ```

mod windows;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use rb_core::SimConfig;
use rb_log::{LogSource, LogSourceLayer};
use rb_motion::MotionLimits;
use rb_persist::{GeometryLayout, GeometryStore, HasGeometry, Rect};
use rb_sim::SimulatorBuilder;

use windows::{CoordinateReadout, CoordinateWindow, LogWindow, MainWindow};

// ── Constants ─────────────────────────────────────────────────────────────────

const LOG_CAPACITY:   usize = 1_000;
const LOG_ROWS:       usize = 20;
const REPORT_EVERY:   Duration = Duration::from_millis(250);

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct HeadlessConfig {
    sim:     SimConfig,
    limits:  MotionLimits,
    /// Targets set one after another, each held for `hold_ms`.
    targets: Vec<(i32, i32)>,
    hold_ms: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            sim:     SimConfig::default(),
            limits:  MotionLimits::default(),
            targets: vec![(150, 100), (220, 180), (60, 140)],
            hold_ms: 1_000,
        }
    }
}

fn load_config(path: Option<&str>) -> Result<HeadlessConfig> {
    let Some(path) = path else {
        return Ok(HeadlessConfig::default());
    };
    let text = fs::read_to_string(Path::new(path))
        .with_context(|| format!("reading config {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // 1. Logging: stderr plus the in-memory source behind the log window.
    let log = Arc::new(LogSource::new(LOG_CAPACITY));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                ),
        )
        .with(LogSourceLayer::new(Arc::clone(&log)))
        .try_init()
        .context("installing tracing subscriber")?;
    info!("log window source ready");

    let arg = std::env::args().nth(1);
    let config = load_config(arg.as_deref())?;

    // 2. Simulator.
    let sim = SimulatorBuilder::new()
        .config(config.sim.clone())
        .limits(config.limits)
        .spawn()?;

    // 3. Windows, with geometry restored where a record exists.
    let readout = Arc::new(CoordinateReadout::new(Arc::clone(sim.motion())));
    let readout_id = sim.subscribe(readout.clone());

    let mut main_window = MainWindow { rect: Rect::new(50, 50, 800, 600) };
    let mut coordinate = CoordinateWindow { rect: Rect::new(420, 10, 200, 400), readout };
    let mut log_window = LogWindow { rect: Rect::new(10, 10, 300, 800), source: Arc::clone(&log) };

    let store = match GeometryStore::per_user() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(%e, "window geometry will not be persisted");
            None
        }
    };
    let mut layout = GeometryLayout::new();
    if let Some(store) = &store {
        match store.load() {
            Ok(saved) => layout = saved,
            Err(e) if e.is_not_found() => info!("no saved window geometry, using defaults"),
            Err(e) => warn!(%e, "ignoring saved window geometry"),
        }
    }
    let restored = layout.apply([
        &mut main_window as &mut dyn HasGeometry,
        &mut coordinate,
        &mut log_window,
    ]);
    info!(restored, "window geometry applied");

    // 4. Clicks arrive on their own thread; the readout is sampled here.
    let hold = Duration::from_millis(config.hold_ms);
    thread::scope(|scope| {
        scope.spawn(|| {
            for &(x, y) in &config.targets {
                sim.set_target(x, y);
                info!(x, y, "clicked");
                thread::sleep(hold);
            }
        });

        let total = hold * u32::try_from(config.targets.len()).unwrap_or(u32::MAX);
        let reports = (total.as_millis() / REPORT_EVERY.as_millis()).max(1);
        for _ in 0..reports {
            thread::sleep(REPORT_EVERY);
            println!("{}", coordinate.readout.text());
        }
    });

    sim.unsubscribe(readout_id);
    let steps = sim.steps();
    sim.shutdown()?;
    println!("stepper ran {steps} ticks");

    // 5. Persist geometry, keeping records of windows not open this run.
    if let Some(store) = &store {
        layout.update_from([
            &main_window as &dyn HasGeometry,
            &coordinate,
            &log_window,
        ]);
        if let Err(e) = store.save(&layout) {
            warn!(%e, "could not save window geometry");
        }
    }

    println!();
    println!("── log window ({} of {} entries) ──", LOG_ROWS.min(log.len()), log.len());
    for line in log_window.visible_lines(LOG_ROWS) {
        println!("{line}");
    }
    Ok(())
}
