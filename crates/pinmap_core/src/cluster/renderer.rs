//! Marker rendering hook.
//!
//! # Responsibility
//! - Define the per-item callback invoked immediately before a marker is
//!   drawn.
//! - Supply the display title from the wrapped adapter; marker styling stays
//!   with the host renderer.

use crate::cluster::entity::MapEntity;
use crate::cluster::item::ClusterItem;
use crate::model::pin::GeoPoint;

/// Marker fields this core owns. Hosts extend styling on their side.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: GeoPoint,
    pub title: Option<String>,
}

impl MarkerOptions {
    /// Starts marker options at a position with no title set.
    pub fn at(position: GeoPoint) -> Self {
        Self {
            position,
            title: None,
        }
    }
}

/// Per-item hook run before each marker draw.
pub trait MarkerRenderer<M: MapEntity> {
    fn on_before_item_rendered(&self, item: &ClusterItem<M>, marker: &mut MarkerOptions);
}

/// Default hook that titles the marker from the wrapped entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitledMarkerRenderer;

impl<M: MapEntity> MarkerRenderer<M> for TitledMarkerRenderer {
    fn on_before_item_rendered(&self, item: &ClusterItem<M>, marker: &mut MarkerOptions) {
        marker.title = Some(item.title());
    }
}
