//! `GeometryStore` — whole-file save and load at a fixed path.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::format::{decode, encode};
use crate::{GeometryLayout, LoadError, LoadResult, LocateError, SaveError, SaveResult};

/// Directory under the user's home that holds the geometry file.
pub const CONFIG_DIR: [&str; 2] = ["Robots", "config"];

/// File name inside [`CONFIG_DIR`].
pub const FILE_NAME: &str = "window-geometry.json";

/// Reads and writes one geometry file.
///
/// Every save replaces the file wholesale, via a temporary file renamed
/// into place, and every load reads it whole; there is no incremental
/// update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeometryStore {
    path: PathBuf,
}

impl GeometryStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<home>/Robots/config/window-geometry.json`.
    pub fn in_home(home: &Path) -> Self {
        let mut path = home.to_path_buf();
        path.extend(CONFIG_DIR);
        path.push(FILE_NAME);
        Self { path }
    }

    /// The store under the current user's home directory, taken from `HOME`
    /// or, failing that, `USERPROFILE`.
    pub fn per_user() -> Result<Self, LocateError> {
        let home = non_empty_var("HOME")
            .or_else(|| non_empty_var("USERPROFILE"))
            .ok_or(LocateError::NoHomeDirectory)?;
        Ok(Self::in_home(Path::new(&home)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `layout`, creating parent directories as needed.
    pub fn save(&self, layout: &GeometryLayout) -> SaveResult<()> {
        let dir = match self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|source| SaveError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
                dir
            }
            None => Path::new("."),
        };

        let bytes = encode(layout)?;
        let write_err = |source| SaveError::Write { path: self.path.clone(), source };

        // Written beside the target and renamed over it, so a crash leaves
        // either the old file or the new one.  The temp file is deleted on
        // any early return.
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!(path = %self.path.display(), windows = layout.len(), "saved window geometry");
        Ok(())
    }

    /// Read and validate the whole file.
    pub fn load(&self) -> LoadResult<GeometryLayout> {
        let bytes = fs::read(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound { path: self.path.clone() },
            _ => LoadError::Read { path: self.path.clone(), source },
        })?;

        let layout = decode(&bytes)?;
        debug!(path = %self.path.display(), windows = layout.len(), "loaded window geometry");
        Ok(layout)
    }
}

fn non_empty_var(key: &str) -> Option<OsString> {
    env::var_os(key).filter(|v| !v.is_empty())
}
