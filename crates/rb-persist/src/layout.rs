//! `GeometryLayout` — the keyed collection that is saved and loaded as one.

use std::collections::BTreeMap;
use std::collections::btree_map;

use tracing::debug;

use crate::{HasGeometry, Rect};

/// One [`Rect`] per window prefix.
///
/// Records for prefixes that no live window claims are kept, so a window
/// that is closed this session keeps its saved position for the next.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeometryLayout {
    windows: BTreeMap<String, Rect>,
}

impl GeometryLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current geometry of every window.
    pub fn capture<'a, W, I>(windows: I) -> Self
    where
        W: HasGeometry + ?Sized + 'a,
        I: IntoIterator<Item = &'a W>,
    {
        let mut layout = Self::new();
        layout.update_from(windows);
        layout
    }

    /// Overwrite the records of the given windows, keeping all others.
    pub fn update_from<'a, W, I>(&mut self, windows: I)
    where
        W: HasGeometry + ?Sized + 'a,
        I: IntoIterator<Item = &'a W>,
    {
        for window in windows {
            self.insert(window.prefix(), window.geometry());
        }
    }

    /// Give each window its recorded geometry.  Windows without a record are
    /// left as they are.
    ///
    /// Returns the number of windows that were updated.
    pub fn apply<'a, W, I>(&self, windows: I) -> usize
    where
        W: HasGeometry + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut W>,
    {
        let mut applied = 0;
        for window in windows {
            match self.windows.get(window.prefix()) {
                Some(&rect) => {
                    window.set_geometry(rect);
                    applied += 1;
                }
                None => debug!(prefix = window.prefix(), "no saved geometry for window"),
            }
        }
        applied
    }

    // ── Map access ────────────────────────────────────────────────────────

    pub fn insert(&mut self, prefix: impl Into<String>, rect: Rect) -> Option<Rect> {
        self.windows.insert(prefix.into(), rect)
    }

    pub fn get(&self, prefix: &str) -> Option<Rect> {
        self.windows.get(prefix).copied()
    }

    pub fn remove(&mut self, prefix: &str) -> Option<Rect> {
        self.windows.remove(prefix)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Records in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rect)> {
        self.windows.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, Rect> {
        &self.windows
    }

    pub(crate) fn from_map(windows: BTreeMap<String, Rect>) -> Self {
        Self { windows }
    }
}

impl<S: Into<String>> FromIterator<(S, Rect)> for GeometryLayout {
    fn from_iter<T: IntoIterator<Item = (S, Rect)>>(iter: T) -> Self {
        Self {
            windows: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for GeometryLayout {
    type Item = (String, Rect);
    type IntoIter = btree_map::IntoIter<String, Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.into_iter()
    }
}
