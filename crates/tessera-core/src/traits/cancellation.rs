//! Stopping a search between units of work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled by the adjacency search before each pair test and by the Meek
/// rules before each pass. A stopped search returns the last completed
/// level or pass with `completed = false`. Parallel FAS levels read the
/// flag from rayon workers, so implementors must be `Send + Sync`.
pub trait Cancellable: Send + Sync {
    fn is_cancelled(&self) -> bool;

    /// Ask the running search to stop at its next poll.
    fn cancel(&self);
}

/// Atomic flag handle. Clones share one flag: keep a clone, hand the other
/// to the search.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Clear the flag so the token can drive another search.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}
