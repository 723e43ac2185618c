//! Clustering algorithm seam.
//!
//! # Responsibility
//! - Define the working-set contract the sync manager drives.
//! - Ship a math-free default engine that renders every item as its own
//!   marker.
//!
//! # Invariants
//! - Engines receive items only through bulk `add_items` calls.
//! - `cluster()` reflects the complete working set, never a partial
//!   intermediate state.

use crate::cluster::entity::MapEntity;
use crate::cluster::item::ClusterItem;
use crate::cluster::renderer::{MarkerOptions, MarkerRenderer, TitledMarkerRenderer};
use std::sync::Arc;

/// Working-set owner contract for an external clustering algorithm.
///
/// Grouping math (radius, zoom-dependent aggregation) belongs to the
/// implementation; the sync manager only decides what items are fed in and
/// when recomputation runs.
pub trait ClusterEngine<M: MapEntity> {
    /// Bulk-inserts adapters into the working set, preserving order.
    fn add_items(&mut self, items: Vec<Arc<ClusterItem<M>>>);

    /// Drops the whole working set.
    fn clear_items(&mut self);

    /// Recomputes clusters from the current working set and notifies the
    /// renderer side.
    fn cluster(&mut self);

    /// Current working-set size.
    fn item_count(&self) -> usize;
}

/// Degenerate engine that treats every item as its own marker.
///
/// Useful as the default wiring for hosts below the item counts where
/// grouping pays off, and as the reference consumer for the renderer hook.
pub struct DirectRenderEngine<M: MapEntity> {
    items: Vec<Arc<ClusterItem<M>>>,
    renderer: Arc<dyn MarkerRenderer<M>>,
    markers: Vec<MarkerOptions>,
}

impl<M: MapEntity> DirectRenderEngine<M> {
    /// Creates an engine with the default title-only renderer hook.
    pub fn new() -> Self {
        Self::with_renderer(Arc::new(TitledMarkerRenderer))
    }

    /// Creates an engine with a host-provided renderer hook.
    pub fn with_renderer(renderer: Arc<dyn MarkerRenderer<M>>) -> Self {
        Self {
            items: Vec::new(),
            renderer,
            markers: Vec::new(),
        }
    }

    /// Markers produced by the last `cluster()` run, in working-set order.
    pub fn markers(&self) -> &[MarkerOptions] {
        &self.markers
    }

    /// Current working set, in insertion order. Pairs index-for-index with
    /// `markers()` after a `cluster()` run.
    pub fn items(&self) -> &[Arc<ClusterItem<M>>] {
        &self.items
    }
}

impl<M: MapEntity> Default for DirectRenderEngine<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MapEntity> ClusterEngine<M> for DirectRenderEngine<M> {
    fn add_items(&mut self, items: Vec<Arc<ClusterItem<M>>>) {
        self.items.extend(items);
    }

    fn clear_items(&mut self) {
        self.items.clear();
        self.markers.clear();
    }

    fn cluster(&mut self) {
        let mut markers = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let mut marker = MarkerOptions::at(item.position());
            self.renderer.on_before_item_rendered(item, &mut marker);
            markers.push(marker);
        }
        self.markers = markers;
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClusterEngine, DirectRenderEngine};
    use crate::cluster::item::ClusterItem;
    use crate::model::pin::Pin;
    use std::sync::Arc;

    fn wrapped(title: &str, lat: f64, lng: f64) -> Arc<ClusterItem<Pin>> {
        Arc::new(ClusterItem::wrap(Arc::new(Pin::new(title).at(lat, lng))).unwrap())
    }

    #[test]
    fn cluster_builds_one_titled_marker_per_item() {
        let mut engine = DirectRenderEngine::new();
        engine.add_items(vec![wrapped("a", 1.0, 2.0), wrapped("b", 3.0, 4.0)]);
        engine.cluster();

        let markers = engine.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].title.as_deref(), Some("a"));
        assert_eq!(markers[1].position.lat, 3.0);
    }

    #[test]
    fn clear_items_drops_items_and_markers() {
        let mut engine = DirectRenderEngine::new();
        engine.add_items(vec![wrapped("a", 1.0, 2.0)]);
        engine.cluster();
        assert_eq!(engine.item_count(), 1);

        engine.clear_items();
        assert_eq!(engine.item_count(), 0);
        assert!(engine.markers().is_empty());
    }

    #[test]
    fn cluster_reflects_full_set_after_repeated_adds() {
        let mut engine = DirectRenderEngine::new();
        engine.add_items(vec![wrapped("a", 1.0, 2.0)]);
        engine.add_items(vec![wrapped("b", 3.0, 4.0)]);
        engine.cluster();
        assert_eq!(engine.markers().len(), 2);
    }
}
