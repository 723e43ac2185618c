//! Core domain logic for Pinmap.
//! This crate is the single source of truth for map clustering sync
//! invariants.

pub mod cluster;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use cluster::engine::{ClusterEngine, DirectRenderEngine};
pub use cluster::entity::MapEntity;
pub use cluster::item::{ClusterItem, UNAVAILABLE_TITLE, UNTITLED_TITLE};
pub use cluster::manager::ClusterSyncManager;
pub use cluster::renderer::{MarkerOptions, MarkerRenderer, TitledMarkerRenderer};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::pin::{GeoPoint, Pin, PinId, PinValidationError};
pub use query::live_results::{LiveResults, PinQueryResults};
pub use repo::pin_repo::{
    PinListQuery, PinRepository, RepoError, RepoResult, SqlitePinRepository,
};
pub use service::sync_service::{MapSyncService, RefreshOutcome};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
