//! On-disk encoding of a [`GeometryLayout`].
//!
//! ```json
//! {
//!   "format": "robots.window-geometry",
//!   "version": 1,
//!   "windows": {
//!     "log":        { "x": 10,  "y": 10, "width": 300, "height": 800 },
//!     "coordinate": { "x": 320, "y": 10, "width": 240, "height": 120 }
//!   }
//! }
//! ```
//!
//! `format` and `version` are checked before `windows` is decoded, so a
//! foreign JSON file is rejected as such rather than as a decode error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{GeometryLayout, LoadError, LoadResult, Rect, SaveResult};

/// Value of the `format` field.
pub const FORMAT: &str = "robots.window-geometry";

/// Highest `version` this build reads, and the one it writes.
pub const VERSION: u64 = 1;

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    format:  &'static str,
    version: u64,
    windows: &'a BTreeMap<String, Rect>,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    format:  Option<String>,
    version: Option<u64>,
    #[serde(default)]
    windows: serde_json::Value,
}

/// Serialize `layout` as pretty-printed JSON.
pub fn encode(layout: &GeometryLayout) -> SaveResult<Vec<u8>> {
    let envelope = EnvelopeOut {
        format:  FORMAT,
        version: VERSION,
        windows: layout.as_map(),
    };
    Ok(serde_json::to_vec_pretty(&envelope)?)
}

/// Parse and validate a geometry file's contents.
pub fn decode(bytes: &[u8]) -> LoadResult<GeometryLayout> {
    let envelope: EnvelopeIn = serde_json::from_slice(bytes)?;

    if envelope.format.as_deref() != Some(FORMAT) {
        return Err(LoadError::ForeignFormat { found: envelope.format });
    }
    match envelope.version {
        Some(VERSION) => {}
        Some(found) => {
            return Err(LoadError::UnsupportedVersion { found, supported: VERSION });
        }
        None => {
            return Err(LoadError::UnsupportedVersion { found: 0, supported: VERSION });
        }
    }

    let windows: BTreeMap<String, Rect> = if envelope.windows.is_null() {
        BTreeMap::new()
    } else {
        serde_json::from_value(envelope.windows)?
    };
    for (prefix, rect) in &windows {
        if !rect.is_valid() {
            return Err(LoadError::InvalidRecord {
                prefix: prefix.clone(),
                reason: "negative width or height",
            });
        }
    }
    Ok(GeometryLayout::from_map(windows))
}
