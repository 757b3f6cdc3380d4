//! The listener trait invoked by [`ChangeNotifier::broadcast`][crate::ChangeNotifier::broadcast].

/// Receives "something changed" notifications.
///
/// Carries no payload: a listener re-reads whatever state it cares about.
///
/// # Contract
///
/// - Must not block; it runs on the broadcasting thread, which is usually a
///   periodic background ticker.
/// - Must not panic.  Panics are not caught by the notifier and unwind into
///   the broadcaster.
///
/// Any `Fn()` closure that is `Send + Sync` is a listener.
pub trait ChangeListener: Send + Sync {
    fn on_changed(&self);
}

impl<F> ChangeListener for F
where
    F: Fn() + Send + Sync,
{
    #[inline]
    fn on_changed(&self) {
        self()
    }
}
