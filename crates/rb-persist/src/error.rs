//! Error types for rb-persist.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to write the geometry file.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot create config directory {path}: {source}")]
    CreateDir {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode window geometry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("cannot write {path}: {source}")]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to read or decode the geometry file.
///
/// Every variant leaves the caller's windows untouched; the usual response
/// is to log it and keep the default layout.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no saved window geometry at {path}")]
    NotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("window geometry file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("not a window geometry file (format {found:?})")]
    ForeignFormat { found: Option<String> },

    #[error("unsupported window geometry version {found}, expected {supported}")]
    UnsupportedVersion { found: u64, supported: u64 },

    #[error("invalid geometry for window `{prefix}`: {reason}")]
    InvalidRecord { prefix: String, reason: &'static str },
}

impl LoadError {
    /// `true` if there was simply nothing saved yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

/// The per-user config location could not be determined.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("neither HOME nor USERPROFILE is set")]
    NoHomeDirectory,
}

pub type SaveResult<T> = Result<T, SaveError>;
pub type LoadResult<T> = Result<T, LoadError>;
