use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, monotonically increasing request tag.
///
/// Every new input snapshot advances the counter; a result is applied only if
/// the tag it was issued with is still the current one. Clones share the same
/// counter, so a worker thread can check staleness without a lock.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the new tag.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, tag: u64) -> bool {
        self.current() == tag
    }
}
