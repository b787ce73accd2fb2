//! Stale-workload cleanup bookkeeping.

use std::collections::BTreeSet;

/// Backend identities whose startup sweep has already run.
///
/// Append-only: an identity is never removed, so each backend is swept at
/// most once for the lifetime of the ledger, even if removals failed.
#[derive(Debug, Default)]
pub struct CleanupLedger {
    cleaned: BTreeSet<String>,
}

impl CleanupLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cleaned(&self, identity: &str) -> bool {
        self.cleaned.contains(identity)
    }

    /// Record a completed sweep. Returns `false` if already recorded.
    pub fn mark_cleaned(&mut self, identity: &str) -> bool {
        self.cleaned.insert(identity.to_string())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cleaned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.cleaned.iter().map(String::as_str)
    }
}

/// Result of a cleanup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The backend was swept earlier; nothing was queried or removed.
    AlreadyCleaned,
    /// The sweep ran. Failed removals are not retried.
    Swept { removed: usize, failed: usize },
}
