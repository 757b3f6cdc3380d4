//! `rb-persist` — window geometry that survives a restart.
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`rect`]    | `Rect`, the `HasGeometry` capability                      |
//! | [`layout`]  | `GeometryLayout` — prefix → `Rect`, capture and apply     |
//! | [`format`]  | Versioned JSON envelope, `encode` / `decode`              |
//! | [`store`]   | `GeometryStore` — whole-file save/load at a fixed path    |
//! | [`error`]   | `SaveError`, `LoadError`, `LocateError`                   |
//!
//! The store knows nothing about concrete window types.  Anything that
//! implements [`HasGeometry`] can be captured into a layout or restored from
//! one.
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = GeometryStore::per_user()?;
//! match store.load() {
//!     Ok(layout) => { layout.apply(windows.iter_mut().map(|w| w.as_mut())); }
//!     Err(e) if e.is_not_found() => {}
//!     Err(e) => tracing::warn!(%e, "keeping default window layout"),
//! }
//! // ... on exit:
//! store.save(&GeometryLayout::capture(windows.iter().map(|w| w.as_ref())))?;
//! ```

pub mod error;
pub mod format;
pub mod layout;
pub mod rect;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{LoadError, LoadResult, LocateError, SaveError, SaveResult};
pub use layout::GeometryLayout;
pub use rect::{HasGeometry, Rect};
pub use store::GeometryStore;
