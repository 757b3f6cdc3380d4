//! `rb-log` — the scrolling diagnostic log behind the log window.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`level`]   | `LogLevel` — six severities, `Trace` through `Fatal`          |
//! | [`entry`]   | `LogEntry` — one level + message pair                         |
//! | [`source`]  | `LogSource` — bounded entry queue plus a `ChangeNotifier`     |
//! | [`layer`]   | `LogSourceLayer` — `tracing_subscriber::Layer` feeding a source |
//!
//! There is no global log.  Whoever builds the application creates one
//! `LogSource`, hands an `Arc` of it to the log view and to
//! `LogSourceLayer`, and every `tracing` event in the process then lands in
//! it.

pub mod entry;
pub mod layer;
pub mod level;
pub mod source;

#[cfg(test)]
mod tests;

pub use entry::LogEntry;
pub use layer::LogSourceLayer;
pub use level::LogLevel;
pub use source::LogSource;
