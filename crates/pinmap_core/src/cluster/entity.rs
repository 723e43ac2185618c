//! Capability contract for clusterable domain objects.

use crate::model::pin::{GeoPoint, Pin, PinId};

/// Positioned + titled capability implemented by persisted objects that can
/// appear on the map.
///
/// The identity returned by `entity_id` must be the persisted primary key:
/// the cluster sync manager keys its identity map on it, so it has to stay
/// stable even when the object's fields mutate underneath a live query.
pub trait MapEntity {
    /// Stable persisted identity used for identity-map keying.
    fn entity_id(&self) -> PinId;

    /// Whether the backing record is still accessible and not tombstoned.
    fn is_valid(&self) -> bool;

    /// Current geographic position, `None` while unplaced.
    fn position(&self) -> Option<GeoPoint>;

    /// Current display title, read from live field state.
    fn title(&self) -> String;
}

impl MapEntity for Pin {
    fn entity_id(&self) -> PinId {
        self.uuid
    }

    fn is_valid(&self) -> bool {
        self.is_active()
    }

    fn position(&self) -> Option<GeoPoint> {
        self.position
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}
