//! Pin domain model.
//!
//! # Responsibility
//! - Define the persisted record wrapped by cluster item adapters.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another pin.
//! - `is_deleted` is the source of truth for tombstone state.
//! - A stored position is always a complete (lat, lng) pair inside the
//!   WGS84 coordinate range.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every persisted pin.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PinId = Uuid;

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in [-90.0, 90.0].
    pub lat: f64,
    /// Longitude in [-180.0, 180.0].
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns whether both components are finite and inside the WGS84 range.
    pub fn is_in_range(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Pin validation errors raised before persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum PinValidationError {
    /// `uuid` is the nil UUID and cannot serve as a stable identity.
    NilUuid,
    /// `title` is empty or whitespace-only.
    BlankTitle,
    /// Position components fall outside the WGS84 coordinate range.
    OutOfRangePosition { lat: f64, lng: f64 },
}

impl Display for PinValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "pin uuid must not be nil"),
            Self::BlankTitle => write!(f, "pin title must not be blank"),
            Self::OutOfRangePosition { lat, lng } => {
                write!(f, "pin position ({lat}, {lng}) is outside the WGS84 range")
            }
        }
    }
}

impl Error for PinValidationError {}

/// Canonical persisted record for one map pin.
///
/// The position is optional on purpose: pins can be captured before they are
/// geocoded, and unpositioned pins are excluded from clustering rather than
/// rejected at persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Stable global ID used for identity-map keying and lookups.
    pub uuid: PinId,
    /// Display title shown on the rendered marker.
    pub title: String,
    /// Geographic position, `None` until the pin is placed.
    pub position: Option<GeoPoint>,
    /// Soft delete tombstone; deleted pins are invalid for clustering.
    pub is_deleted: bool,
}

impl Pin {
    /// Creates a new pin with a generated stable ID and no position.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a new pin with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: PinId, title: impl Into<String>) -> Self {
        Self {
            uuid,
            title: title.into(),
            position: None,
            is_deleted: false,
        }
    }

    /// Returns this pin placed at the given coordinate.
    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.position = Some(GeoPoint::new(lat, lng));
        self
    }

    /// Marks this pin as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears the soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this pin should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Checks the persistence contract for this record.
    ///
    /// # Errors
    /// - `NilUuid` when the identity is the nil UUID.
    /// - `BlankTitle` when the title carries no visible characters.
    /// - `OutOfRangePosition` when a position is present but out of range.
    pub fn validate(&self) -> Result<(), PinValidationError> {
        if self.uuid.is_nil() {
            return Err(PinValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(PinValidationError::BlankTitle);
        }
        if let Some(position) = self.position {
            if !position.is_in_range() {
                return Err(PinValidationError::OutOfRangePosition {
                    lat: position.lat,
                    lng: position.lng,
                });
            }
        }
        Ok(())
    }
}
