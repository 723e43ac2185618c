//! Query-backed result set abstraction.
//!
//! # Responsibility
//! - Expose the current snapshot of a possibly auto-updating pin query.
//! - Report result-set level validity and load state separately from
//!   element-level validity.
//!
//! # Invariants
//! - `entities()` is a point-in-time snapshot in native query order; it does
//!   not change while a reference to it is held.
//! - An invalidated or unloaded result set still answers `len()` without
//!   touching element state.

use crate::cluster::entity::MapEntity;
use crate::model::pin::Pin;
use std::sync::Arc;

/// Read contract for a live, query-backed collection of map entities.
///
/// Implementations are expected to be cheap to query: the cluster sync
/// manager calls `is_valid`/`is_loaded` once and then walks the snapshot a
/// single time per refresh cycle.
pub trait LiveResults {
    type Entity: MapEntity;

    /// Whether the backing query/session is still usable.
    fn is_valid(&self) -> bool;

    /// Whether the query has produced its first complete snapshot.
    fn is_loaded(&self) -> bool;

    /// Number of elements in the current snapshot.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The current snapshot in native query order.
    fn entities(&self) -> &[Arc<Self::Entity>];
}

/// Snapshot result set produced from a repository read.
///
/// Carries explicit validity/load flags so callers can hand the manager a
/// degraded result set (closed session, query still running) and get the
/// documented empty-map behavior instead of an error.
#[derive(Debug, Clone)]
pub struct PinQueryResults {
    pins: Vec<Arc<Pin>>,
    valid: bool,
    loaded: bool,
}

impl PinQueryResults {
    /// Wraps a completed repository read.
    pub fn loaded(pins: Vec<Pin>) -> Self {
        Self {
            pins: pins.into_iter().map(Arc::new).collect(),
            valid: true,
            loaded: true,
        }
    }

    /// Wraps a query that has not delivered its first snapshot yet.
    pub fn pending(pins: Vec<Pin>) -> Self {
        Self {
            pins: pins.into_iter().map(Arc::new).collect(),
            valid: true,
            loaded: false,
        }
    }

    /// Represents a result set whose backing session is gone.
    pub fn invalidated() -> Self {
        Self {
            pins: Vec::new(),
            valid: false,
            loaded: false,
        }
    }
}

impl LiveResults for PinQueryResults {
    type Entity = Pin;

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn len(&self) -> usize {
        self.pins.len()
    }

    fn entities(&self) -> &[Arc<Pin>] {
        &self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::{LiveResults, PinQueryResults};
    use crate::model::pin::Pin;

    #[test]
    fn loaded_results_report_valid_and_loaded() {
        let results = PinQueryResults::loaded(vec![Pin::new("cafe").at(1.0, 2.0)]);
        assert!(results.is_valid());
        assert!(results.is_loaded());
        assert_eq!(results.len(), 1);
        assert!(!results.is_empty());
    }

    #[test]
    fn pending_results_keep_snapshot_but_are_not_loaded() {
        let results = PinQueryResults::pending(vec![Pin::new("cafe")]);
        assert!(results.is_valid());
        assert!(!results.is_loaded());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn invalidated_results_are_neither_valid_nor_loaded() {
        let results = PinQueryResults::invalidated();
        assert!(!results.is_valid());
        assert!(!results.is_loaded());
        assert!(results.is_empty());
    }
}
