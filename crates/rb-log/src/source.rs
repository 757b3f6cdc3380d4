//! `LogSource` — bounded in-memory log with change notification.

use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rb_core::ListenerId;
use rb_notify::{ChangeListener, ChangeNotifier};

use crate::{LogEntry, LogLevel};

/// Holds the most recent `capacity` log entries and tells registered
/// listeners whenever one is appended.
///
/// Readers get owned copies of the entries (`range`, `all`) so a log view
/// never holds the entry lock while rendering.  `append` releases the lock
/// before notifying, so a listener may read the source from inside
/// `on_changed`.
pub struct LogSource {
    capacity: usize,
    entries:  RwLock<VecDeque<LogEntry>>,
    notifier: ChangeNotifier,
}

impl LogSource {
    /// Create an empty source that keeps at most `capacity` entries.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries:  RwLock::new(VecDeque::with_capacity(capacity.min(4_096))),
            notifier: ChangeNotifier::new(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, VecDeque<LogEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<LogEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Writing ───────────────────────────────────────────────────────────

    /// Store a new entry, dropping the oldest one if the source is full, then
    /// notify every registered listener.
    pub fn append(&self, level: LogLevel, message: impl Into<String>) {
        {
            let mut entries = self.write();
            if entries.len() == self.capacity {
                entries.pop_front();
            }
            entries.push_back(LogEntry::new(level, message));
        }
        self.notifier.broadcast();
    }

    // ── Reading ───────────────────────────────────────────────────────────

    /// Maximum number of entries retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Up to `count` entries starting at index `start` (0 = oldest held).
    ///
    /// Returns an empty vec when `start` is past the end; a range running
    /// off the end is cut short.
    pub fn range(&self, start: usize, count: usize) -> Vec<LogEntry> {
        let entries = self.read();
        if start >= entries.len() {
            return Vec::new();
        }
        let end = start.saturating_add(count).min(entries.len());
        entries.range(start..end).cloned().collect()
    }

    /// Every entry currently held, oldest first.
    pub fn all(&self) -> Vec<LogEntry> {
        self.read().iter().cloned().collect()
    }

    // ── Listeners ─────────────────────────────────────────────────────────

    /// Be told about every future `append`.
    pub fn register(&self, listener: Arc<dyn ChangeListener>) -> ListenerId {
        self.notifier.register(listener)
    }

    pub fn unregister(&self, id: ListenerId) -> bool {
        self.notifier.unregister(id)
    }
}

impl std::fmt::Debug for LogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSource")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("notifier", &self.notifier)
            .finish()
    }
}
