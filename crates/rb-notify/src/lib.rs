//! `rb-notify` — multi-listener change broadcast.
//!
//! [`ChangeNotifier`] keeps a registry of listeners plus a cached, immutable
//! snapshot of them.  Registration and removal mark the snapshot dirty;
//! the next broadcast rebuilds it once and every broadcast after that reuses
//! it until the registry changes again.
//!
//! ```text
//! register / unregister ──► [lock] listeners.push/remove; dirty = true [unlock]
//! broadcast ──────────────► [lock] if dirty { rebuild snapshot }; clone Arc [unlock]
//!                           for listener in snapshot { listener.on_changed() }
//! ```
//!
//! Listeners run with no lock held, on the broadcasting thread.  A listener
//! that needs to touch a UI must hop to the UI's own thread itself.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rb_notify::ChangeNotifier;
//!
//! let notifier: ChangeNotifier = ChangeNotifier::new();
//! let id = notifier.register(Arc::new(|| println!("changed")));
//! notifier.broadcast();
//! notifier.unregister(id);
//! ```

pub mod listener;
pub mod notifier;


pub use listener::ChangeListener;
pub use notifier::ChangeNotifier;
