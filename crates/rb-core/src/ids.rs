//! Strongly typed identifier wrappers.

use std::fmt;

/// Handle returned when a listener is registered with a notifier.
///
/// IDs are allocated from a per-notifier counter and never reused, so a
/// stale handle can only ever fail to unregister — it cannot remove some
/// other listener that happened to be registered later.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListenerId(pub u64);

impl ListenerId {
    /// The ID following `self` in allocation order.
    #[inline(always)]
    pub fn next(self) -> ListenerId {
        ListenerId(self.0 + 1)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerId({})", self.0)
    }
}
