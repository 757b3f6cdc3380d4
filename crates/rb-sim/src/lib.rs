//! `rb-sim` — threaded driver for the robots motion model.
//!
//! # Threads
//!
//! ```text
//! rb-stepper  every step_period:   state' = step(state, limits, step_dt)
//!                                  publish position + direction
//!                                  broadcast()            (no redraw period)
//! rb-redraw   every redraw_period: broadcast()            (redraw period set)
//! caller      any time:            set_target(x, y)
//! ```
//!
//! Both workers are [`Ticker`]s sharing one [`CancelToken`] and one
//! [`Clock`].  Tests drive them with [`ManualClock`] instead of real time.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rb_sim::SimulatorBuilder;
//!
//! let sim = SimulatorBuilder::new().spawn()?;
//! sim.subscribe(Arc::new(|| repaint()));
//! sim.set_target(320, 240);
//! // ...
//! sim.shutdown()?;
//! ```

pub mod builder;
pub mod clock;
pub mod error;
pub mod sim;
pub mod ticker;


pub use builder::{REDRAW_THREAD, STEPPER_THREAD, SimulatorBuilder};
pub use clock::{CancelToken, Clock, ManualClock, SystemClock};
pub use error::{SimError, SimResult};
pub use sim::Simulator;
pub use ticker::Ticker;
