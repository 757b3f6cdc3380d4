//! `LogSourceLayer` — routes `tracing` events into a [`LogSource`].

use std::cell::Cell;
use std::fmt::{self, Write};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::{LogLevel, LogSource};

thread_local! {
    /// Set while this thread is inside `on_event`.  A `LogSource` listener
    /// that itself logs would otherwise recurse through `append` forever.
    static RECORDING: Cell<bool> = const { Cell::new(false) };
}

/// A [`Layer`] that appends every event to a shared [`LogSource`].
///
/// The entry text is the event's message followed by its other fields as
/// `name=value` pairs, e.g. `target updated x=10 y=20`.  Events raised from
/// inside a `LogSource` listener on the same thread are dropped.
///
/// ```rust,ignore
/// use tracing_subscriber::prelude::*;
///
/// let log = Arc::new(LogSource::new(1_000));
/// tracing_subscriber::registry()
///     .with(tracing_subscriber::fmt::layer())
///     .with(LogSourceLayer::new(Arc::clone(&log)))
///     .init();
/// ```
pub struct LogSourceLayer {
    source: Arc<LogSource>,
}

impl LogSourceLayer {
    pub fn new(source: Arc<LogSource>) -> Self {
        Self { source }
    }
}

impl<S: Subscriber> Layer<S> for LogSourceLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let Some(_guard) = RecordingGuard::enter() else {
            return;
        };

        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);
        self.source
            .append(LogLevel::from(*event.metadata().level()), visitor.finish());
    }
}

/// Holds the `RECORDING` flag; cleared on drop, including while unwinding
/// from a panicking listener.
struct RecordingGuard;

impl RecordingGuard {
    fn enter() -> Option<Self> {
        if RECORDING.with(|r| r.replace(true)) {
            None
        } else {
            Some(RecordingGuard)
        }
    }
}

impl Drop for RecordingGuard {
    fn drop(&mut self) {
        RECORDING.with(|r| r.set(false));
    }
}

/// Collects an event's fields into a single line.
#[derive(Default)]
struct EntryVisitor {
    message: String,
    fields:  String,
}

impl EntryVisitor {
    fn finish(mut self) -> String {
        if self.message.is_empty() {
            return self.fields.trim_start().to_owned();
        }
        self.message.push_str(&self.fields);
        self.message
    }
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}
