//! Outcome of an import operation.

use crate::error::{ImportError, UserFacingError};
use crate::models::TunnelConfig;

/// A unit of work that failed, with the item it concerned
#[derive(Debug)]
pub struct ImportFailure {
    /// Source or archive entry name
    pub item: String,
    /// What went wrong
    pub error: ImportError,
}

/// Result of importing one source.
///
/// A single-file import produces at most one tunnel or one failure; an
/// archive import produces one of either per qualifying entry.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Tunnels that were saved, in import order
    pub imported: Vec<TunnelConfig>,
    /// Items that failed
    pub failures: Vec<ImportFailure>,
    /// Whether the operation stopped early on cancellation
    pub cancelled: bool,
}

impl ImportReport {
    /// Creates an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a report for a single failed item
    #[must_use]
    pub fn failed(item: impl Into<String>, error: ImportError) -> Self {
        let mut report = Self::new();
        report.add_failure(item, error);
        report
    }

    /// Creates a report for an import cancelled before any work
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::default()
        }
    }

    /// Records a saved tunnel
    pub fn add_tunnel(&mut self, tunnel: TunnelConfig) {
        self.imported.push(tunnel);
    }

    /// Records a failed item
    pub fn add_failure(&mut self, item: impl Into<String>, error: ImportError) {
        self.failures.push(ImportFailure {
            item: item.into(),
            error,
        });
    }

    /// Appends another report's results
    pub fn merge(&mut self, other: Self) {
        self.imported.extend(other.imported);
        self.failures.extend(other.failures);
        self.cancelled |= other.cancelled;
    }

    /// Returns the total number of items processed
    #[must_use]
    pub fn total_processed(&self) -> usize {
        self.imported.len() + self.failures.len()
    }

    /// Returns true if any item failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Returns true if nothing failed and the import ran to completion
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.has_failures() && !self.cancelled
    }

    /// The message to show the user, based on the first failure
    #[must_use]
    pub fn user_facing_error(&self) -> Option<UserFacingError> {
        self.failures.first().map(|failure| failure.error.user_facing())
    }

    /// Returns a summary string of the import result
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Imported: {}, Failed: {}",
            self.imported.len(),
            self.failures.len()
        );
        if self.cancelled {
            summary.push_str(" (cancelled)");
        }
        summary
    }
}
