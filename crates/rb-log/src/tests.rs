//! Unit tests for rb-log.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{LogEntry, LogLevel, LogSource, LogSourceLayer};

// ── LogLevel ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod level {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
        assert_eq!(LogLevel::Trace.level(), 0);
        assert_eq!(LogLevel::Fatal.level(), 5);
    }

    #[test]
    fn tracing_levels_map_across() {
        assert_eq!(LogLevel::from(tracing::Level::TRACE), LogLevel::Trace);
        assert_eq!(LogLevel::from(tracing::Level::INFO), LogLevel::Info);
        assert_eq!(LogLevel::from(tracing::Level::WARN), LogLevel::Warning);
        assert_eq!(LogLevel::from(tracing::Level::ERROR), LogLevel::Error);
    }

    #[test]
    fn entry_display() {
        let e = LogEntry::new(LogLevel::Warning, "low battery");
        assert_eq!(e.to_string(), "[WARN] low battery");
    }
}

// ── LogSource ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod source {
    use super::*;

    fn filled(capacity: usize, n: usize) -> LogSource {
        let log = LogSource::new(capacity);
        for i in 0..n {
            log.append(LogLevel::Info, format!("line {i}"));
        }
        log
    }

    fn messages(entries: &[LogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn all_returns_oldest_first() {
        let log = filled(10, 3);
        assert_eq!(messages(&log.all()), ["line 0", "line 1", "line 2"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn full_source_drops_oldest() {
        let log = filled(3, 5);
        assert_eq!(log.len(), 3);
        assert_eq!(messages(&log.all()), ["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let log = filled(0, 2);
        assert_eq!(log.capacity(), 1);
        assert_eq!(messages(&log.all()), ["line 1"]);
    }

    #[test]
    fn range_is_clamped() {
        let log = filled(10, 5);
        assert_eq!(messages(&log.range(1, 2)), ["line 1", "line 2"]);
        assert_eq!(messages(&log.range(3, 100)), ["line 3", "line 4"]);
        assert!(log.range(5, 1).is_empty());
        assert_eq!(log.range(4, usize::MAX).len(), 1);
    }

    #[test]
    fn new_source_is_empty() {
        let log = LogSource::new(4);
        assert!(log.is_empty());
        assert!(log.all().is_empty());
    }

    #[test]
    fn append_notifies_listeners() {
        let log = LogSource::new(4);
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let id = log.register(Arc::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));

        log.append(LogLevel::Debug, "a");
        log.append(LogLevel::Debug, "b");
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        assert!(log.unregister(id));
        log.append(LogLevel::Debug, "c");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listener_can_read_the_source() {
        let log = Arc::new(LogSource::new(4));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (l, s) = (Arc::clone(&log), Arc::clone(&seen));
        log.register(Arc::new(move || {
            s.lock().unwrap().push(l.len());
        }));

        log.append(LogLevel::Info, "first");
        log.append(LogLevel::Info, "second");
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }
}

// ── LogSourceLayer ────────────────────────────────────────────────────────────

#[cfg(test)]
mod layer {
    use super::*;
    use tracing_subscriber::prelude::*;

    fn capture(f: impl FnOnce()) -> Arc<LogSource> {
        let log = Arc::new(LogSource::new(16));
        let subscriber =
            tracing_subscriber::registry().with(LogSourceLayer::new(Arc::clone(&log)));
        tracing::subscriber::with_default(subscriber, f);
        log
    }

    #[test]
    fn events_become_entries() {
        let log = capture(|| {
            tracing::info!("agent started");
            tracing::warn!(x = 10, y = 20, "target moved");
        });

        let all = log.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], LogEntry::new(LogLevel::Info, "agent started"));
        assert_eq!(all[1].level, LogLevel::Warning);
        assert_eq!(all[1].message, "target moved x=10 y=20");
    }

    #[test]
    fn fields_without_message() {
        let log = capture(|| tracing::error!(code = 7));
        assert_eq!(log.all(), vec![LogEntry::new(LogLevel::Error, "code=7")]);
    }

    #[test]
    fn logging_from_a_listener_does_not_recurse() {
        let log = capture(|| {});
        log.register(Arc::new(|| tracing::info!("listener woke")));

        let subscriber =
            tracing_subscriber::registry().with(LogSourceLayer::new(Arc::clone(&log)));
        tracing::subscriber::with_default(subscriber, || tracing::info!("outer"));

        assert_eq!(log.all(), vec![LogEntry::new(LogLevel::Info, "outer")]);
    }
}
