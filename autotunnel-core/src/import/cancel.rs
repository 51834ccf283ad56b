//! Cooperative cancellation for import operations

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag for a running import.
///
/// Clones observe the same flag. The importer looks at it before opening a
/// source, before each archive entry and again right before each save.
/// Work already saved when the flag is raised stays saved; nothing after
/// the next check is written.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag; every clone sees it on its next check
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once any clone has called [`cancel`](Self::cancel)
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
