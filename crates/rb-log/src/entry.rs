use std::fmt;

use crate::LogLevel;

/// One line of the diagnostic log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub level:   LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
