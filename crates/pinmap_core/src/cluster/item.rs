//! Cluster item adapter over one persisted map entity.
//!
//! # Responsibility
//! - Present the uniform position + title shape the clustering engine and
//!   renderer consume.
//! - Shield marker rendering from entities whose backing record has gone
//!   away between refresh cycles.
//!
//! # Invariants
//! - The captured position never changes for the adapter's lifetime.
//! - Title reads go through a liveness check; an invalidated entity yields
//!   the fallback title, never stale field data.

use crate::cluster::entity::MapEntity;
use crate::model::pin::{GeoPoint, PinId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Title shown when the wrapped entity no longer reports itself valid.
pub const UNAVAILABLE_TITLE: &str = "(unavailable)";

/// Title shown when the entity's own title carries no visible characters.
pub const UNTITLED_TITLE: &str = "(untitled)";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static CONTROL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x1f\x7f]+").expect("valid control-char regex"));

/// Snapshot view of one persisted entity for clustering and rendering.
///
/// Wraps exactly one entity for exactly one refresh cycle; the next cycle
/// allocates fresh adapters and drops these.
#[derive(Debug)]
pub struct ClusterItem<M: MapEntity> {
    entity: Arc<M>,
    position: GeoPoint,
}

impl<M: MapEntity> ClusterItem<M> {
    /// Wraps an entity, capturing its position once.
    ///
    /// Returns `None` when the entity is invalid or unpositioned; such
    /// entities are filtered out of clustering rather than wrapped.
    pub fn wrap(entity: Arc<M>) -> Option<Self> {
        if !entity.is_valid() {
            return None;
        }
        let position = entity.position()?;
        Some(Self { entity, position })
    }

    /// The position captured at wrap time. Pure; stable for this adapter.
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// The marker title, read from the entity's current field state.
    ///
    /// The read is lazy on purpose so edits made after wrapping still show
    /// up on the next marker draw. When the entity has been invalidated in
    /// the meantime the defined fallback is returned instead of whatever the
    /// dead record would produce.
    pub fn title(&self) -> String {
        if !self.entity.is_valid() {
            return UNAVAILABLE_TITLE.to_string();
        }
        derive_marker_title(&self.entity.title())
    }

    /// Stable identity of the wrapped entity.
    pub fn entity_id(&self) -> PinId {
        self.entity.entity_id()
    }

    /// Read access to the wrapped entity for click handlers and renderers
    /// resolved through the manager's identity map.
    pub fn source(&self) -> &M {
        &self.entity
    }
}

/// Normalizes a raw persisted title into one marker display shape.
///
/// Control characters are stripped and runs of whitespace collapse to a
/// single space, so multi-line note-style titles stay readable on a marker.
pub fn derive_marker_title(raw: &str) -> String {
    let stripped = CONTROL_RE.replace_all(raw, " ");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        return UNTITLED_TITLE.to_string();
    }
    trimmed.to_string()
}
