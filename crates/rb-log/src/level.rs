use std::fmt;

/// Severity of a [`LogEntry`][crate::LogEntry], ordered from least to most
/// severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace   = 0,
    Debug   = 1,
    Info    = 2,
    Warning = 3,
    Error   = 4,
    Fatal   = 5,
}

impl LogLevel {
    /// Numeric severity, `0` for `Trace` up to `5` for `Fatal`.
    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace   => "TRACE",
            LogLevel::Debug   => "DEBUG",
            LogLevel::Info    => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error   => "ERROR",
            LogLevel::Fatal   => "FATAL",
        }
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO  => LogLevel::Info,
            tracing::Level::WARN  => LogLevel::Warning,
            _                     => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
