//! Map sync use-case service.
//!
//! # Responsibility
//! - Turn storage-change notifications into cluster refresh cycles.
//! - Surface refresh outcomes for host diagnostics.
//!
//! # Invariants
//! - Service APIs never bypass the manager's refresh protocol.
//! - The service stays storage-agnostic above the repository contract.

use crate::cluster::engine::ClusterEngine;
use crate::cluster::manager::ClusterSyncManager;
use crate::model::pin::Pin;
use crate::query::live_results::PinQueryResults;
use crate::repo::pin_repo::{PinListQuery, PinRepository, RepoResult};

/// Counts describing one completed refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Adapters handed to the clustering engine.
    pub clustered: usize,
    /// Snapshot elements filtered out (invalid or unpositioned).
    pub skipped: usize,
}

/// Use-case facade tying pin storage to one cluster sync manager.
pub struct MapSyncService<R: PinRepository, E: ClusterEngine<Pin>> {
    repo: R,
    manager: ClusterSyncManager<Pin, E>,
}

impl<R: PinRepository, E: ClusterEngine<Pin>> MapSyncService<R, E> {
    /// Creates a service over a repository and an injected clustering engine.
    pub fn new(repo: R, engine: E) -> Self {
        Self {
            repo,
            manager: ClusterSyncManager::new(engine),
        }
    }

    /// Queries current pin storage and rebuilds the clustered set from it.
    ///
    /// Storage faults propagate; a successfully read snapshot never fails,
    /// it only filters.
    pub fn refresh_from_storage(&mut self, query: &PinListQuery) -> RepoResult<RefreshOutcome> {
        let pins = self.repo.list_pins(query)?;
        let total = pins.len();

        let results = PinQueryResults::loaded(pins);
        self.manager.refresh(Some(&results));

        let clustered = self.manager.item_count();
        Ok(RefreshOutcome {
            clustered,
            skipped: total - clustered,
        })
    }

    /// Read access for `get_item` and marker lookups.
    pub fn manager(&self) -> &ClusterSyncManager<Pin, E> {
        &self.manager
    }

    /// Mutable access for host-driven refreshes with external result sets.
    pub fn manager_mut(&mut self) -> &mut ClusterSyncManager<Pin, E> {
        &mut self.manager
    }

    /// Read access to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }
}
