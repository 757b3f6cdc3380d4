//! `ChangeNotifier` — listener registry with a copy-on-write snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rb_core::ListenerId;
use tracing::trace;

use crate::ChangeListener;

/// Registry state guarded by the notifier's lock.
struct Registry<L: ?Sized> {
    next_id:   ListenerId,
    listeners: Vec<(ListenerId, Arc<L>)>,
    /// Immutable view handed to broadcasts.  Stale while `dirty` is set.
    snapshot:  Arc<[Arc<L>]>,
    dirty:     bool,
}

impl<L: ?Sized> Registry<L> {
    /// Return the current snapshot, rebuilding it first if the listener set
    /// changed since it was last built.
    fn current_snapshot(&mut self) -> Arc<[Arc<L>]> {
        if self.dirty {
            self.snapshot = self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect();
            self.dirty = false;
        }
        Arc::clone(&self.snapshot)
    }
}

/// Broadcasts change notifications to a dynamic set of listeners.
///
/// `L` defaults to `dyn ChangeListener`; any `?Sized` listener type works
/// with [`notify`][Self::notify], and [`broadcast`][Self::broadcast] is
/// available whenever `L: ChangeListener`.
///
/// # Snapshot isolation
///
/// A broadcast invokes exactly the listeners registered when it took its
/// snapshot.  A listener unregistered before the broadcast started is never
/// called; one registered or unregistered while the broadcast is running
/// is seen from the next broadcast on.
///
/// # Reentrancy
///
/// The registry lock is released before any listener runs, so a listener
/// may call [`register`][Self::register] or [`unregister`][Self::unregister]
/// on the same notifier without deadlocking.  Such changes do not affect the
/// broadcast in progress.
///
/// # Listener faults
///
/// Panics raised by a listener are not caught.  They unwind through
/// `broadcast` into the caller, and listeners later in the snapshot are not
/// invoked for that broadcast.
pub struct ChangeNotifier<L: ?Sized + Send + Sync = dyn ChangeListener> {
    registry: Mutex<Registry<L>>,
}

impl<L: ?Sized + Send + Sync> ChangeNotifier<L> {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                next_id:   ListenerId(0),
                listeners: Vec::new(),
                snapshot:  Arc::from(Vec::new()),
                dirty:     false,
            }),
        }
    }

    /// The registry lock.  No code path panics while holding it, so a
    /// poisoned lock still guards a consistent registry.
    fn lock(&self) -> MutexGuard<'_, Registry<L>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `listener` and return the handle that removes it again.
    ///
    /// The same `Arc` may be registered more than once; each registration
    /// gets its own ID and is invoked once per broadcast.
    pub fn register(&self, listener: Arc<L>) -> ListenerId {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id = id.next();
        registry.listeners.push((id, listener));
        registry.dirty = true;
        trace!(%id, listeners = registry.listeners.len(), "listener registered");
        id
    }

    /// Remove the listener registered under `id`.
    ///
    /// Returns `false` if `id` is unknown or was already removed.
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut registry = self.lock();
        let Some(pos) = registry.listeners.iter().position(|(lid, _)| *lid == id) else {
            return false;
        };
        registry.listeners.swap_remove(pos);
        registry.dirty = true;
        trace!(%id, listeners = registry.listeners.len(), "listener unregistered");
        true
    }

    /// Number of currently registered listeners.
    pub fn len(&self) -> usize {
        self.lock().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The listener set a broadcast starting now would invoke.
    ///
    /// Rebuilt at most once per change to the registry; otherwise the cached
    /// `Arc` is cloned.
    pub fn snapshot(&self) -> Arc<[Arc<L>]> {
        self.lock().current_snapshot()
    }

    /// Call `f` once for every listener in the current snapshot.
    ///
    /// The lock is held only while the snapshot is fetched, never while `f`
    /// runs.
    pub fn notify<F>(&self, mut f: F)
    where
        F: FnMut(&L),
    {
        let snapshot = self.snapshot();
        for listener in snapshot.iter() {
            f(listener);
        }
    }
}

impl<L: ?Sized + ChangeListener> ChangeNotifier<L> {
    /// Invoke [`ChangeListener::on_changed`] on every listener in the current
    /// snapshot.
    pub fn broadcast(&self) {
        self.notify(|listener| listener.on_changed());
    }
}

impl<L: ?Sized + Send + Sync> Default for ChangeNotifier<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized + Send + Sync> std::fmt::Debug for ChangeNotifier<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.lock();
        f.debug_struct("ChangeNotifier")
            .field("listeners", &registry.listeners.len())
            .field("dirty", &registry.dirty)
            .finish()
    }
}
