//! Cluster sync manager.
//!
//! # Responsibility
//! - Own the identity map from persisted pin IDs to cluster item adapters.
//! - Run the refresh protocol that reconciles a live result set with the
//!   clustering engine's working set.
//!
//! # Invariants
//! - After any completed refresh, the identity map and the engine working
//!   set are mutually consistent: one adapter per valid, positioned element
//!   of the most recent snapshot, in snapshot order, and nothing else.
//! - A refresh is one critical section; the exclusive borrow makes a
//!   concurrent refresh or a mid-refresh lookup unrepresentable.

use crate::cluster::engine::ClusterEngine;
use crate::cluster::entity::MapEntity;
use crate::cluster::item::ClusterItem;
use crate::model::pin::PinId;
use crate::query::live_results::LiveResults;
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Owner of the clustered item set for one map display.
///
/// Composes the external clustering algorithm instead of inheriting from it:
/// the engine is injected at construction and the manager drives it through
/// the `ClusterEngine` contract.
pub struct ClusterSyncManager<M: MapEntity, E: ClusterEngine<M>> {
    engine: E,
    item_map: BTreeMap<PinId, Arc<ClusterItem<M>>>,
}

impl<M: MapEntity, E: ClusterEngine<M>> ClusterSyncManager<M, E> {
    /// Creates a manager around an injected clustering engine.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            item_map: BTreeMap::new(),
        }
    }

    /// Looks up the current adapter for a persisted pin ID.
    ///
    /// Returns `None` for entities that were filtered out of the last
    /// refresh or belong to a prior cycle. No side effects.
    pub fn get_item(&self, id: PinId) -> Option<&Arc<ClusterItem<M>>> {
        self.item_map.get(&id)
    }

    /// Number of adapters produced by the last refresh.
    pub fn item_count(&self) -> usize {
        self.item_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_map.is_empty()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Rebuilds the clustered item set from a live result set snapshot.
    ///
    /// Protocol, in order:
    /// 1. Drop the engine's whole working set.
    /// 2. Clear the identity map.
    /// 3. Absent, invalidated, or not-yet-loaded input ends the cycle here
    ///    with an empty map state; no re-cluster is requested.
    /// 4. Walk the snapshot once in native order, wrapping every valid,
    ///    positioned element; everything else is filtered, not an error.
    /// 5. Hand the staged adapters to the engine in one bulk insert.
    /// 6. Request exactly one re-cluster, after the bulk insert, so grouping
    ///    reflects the complete new set.
    ///
    /// Degraded input is not a failure; faults raised by the result-set or
    /// entity layer during iteration propagate to the caller unhandled.
    pub fn refresh<R>(&mut self, results: Option<&R>)
    where
        R: LiveResults<Entity = M>,
    {
        self.engine.clear_items();
        self.item_map.clear();

        let results = match results {
            Some(results) if results.is_valid() && results.is_loaded() => results,
            Some(results) => {
                info!(
                    "event=cluster_refresh module=cluster status=empty reason={}",
                    if results.is_valid() {
                        "not_loaded"
                    } else {
                        "invalidated"
                    }
                );
                return;
            }
            None => {
                info!("event=cluster_refresh module=cluster status=empty reason=absent");
                return;
            }
        };

        let mut staged = Vec::with_capacity(results.len());
        let mut skipped = 0usize;
        for entity in results.entities() {
            match ClusterItem::wrap(Arc::clone(entity)) {
                Some(item) => {
                    let item = Arc::new(item);
                    self.item_map.insert(item.entity_id(), Arc::clone(&item));
                    staged.push(item);
                }
                None => skipped += 1,
            }
        }

        let clustered = staged.len();
        self.engine.add_items(staged);
        self.engine.cluster();

        info!(
            "event=cluster_refresh module=cluster status=ok clustered={clustered} skipped={skipped}"
        );
    }
}
