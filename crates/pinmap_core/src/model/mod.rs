//! Domain model for map-displayable pins.
//!
//! # Responsibility
//! - Define the canonical persisted record fed into map clustering.
//! - Keep coordinate and validity semantics in one place.
//!
//! # Invariants
//! - Every pin is identified by a stable `PinId`.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod pin;
