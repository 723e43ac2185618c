//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository reads into cluster refresh cycles.
//! - Keep UI/FFI layers decoupled from storage and clustering details.

pub mod sync_service;
