//! Processing statistics tracking.
//!
//! This module provides thread-safe counters for failed attempts, shared by
//! every fetch task of a batch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Thread-safe processing statistics tracker.
///
/// Counts failed attempts per [`FailureKind`] and the number of retries issued.
/// All kinds are initialized to zero on creation, so the map is never written
/// after construction and only the atomics change.
pub struct ProcessingStats {
    failures: HashMap<FailureKind, AtomicUsize>,
    retries: AtomicUsize,
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        ProcessingStats {
            failures,
            retries: AtomicUsize::new(0),
        }
    }

    /// Increment a failure counter.
    pub fn increment_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                kind
            );
        }
    }

    /// Record that an attempt is being retried.
    pub fn increment_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    /// Failed attempts recorded for one kind.
    pub fn get_failure_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Failed attempts across all kinds.
    pub fn total_failures(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Attempts that were followed by another attempt.
    pub fn total_retries(&self) -> usize {
        self.retries.load(Ordering::Relaxed)
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
