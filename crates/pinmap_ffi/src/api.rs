//! FFI use-case API for map-host-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the map UI via FRB.
//! - Keep error semantics simple for early-stage UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Marker rows are emitted in clustering working-set order.

use log::info;
use pinmap_core::db::open_db;
use pinmap_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DirectRenderEngine, MapSyncService, Pin, PinId, PinListQuery, PinRepository,
    SqlitePinRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const MAP_DB_FILE_NAME: &str = "pinmap_map.sqlite3";
static MAP_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One marker row for the host map layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarkerItem {
    /// Stable pin ID in string form, for click-through lookups.
    pub pin_id: String,
    pub lat: f64,
    pub lng: f64,
    /// Display title, already normalized for marker rendering.
    pub title: String,
}

/// Marker listing envelope for the map refresh flow.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarkersResponse {
    /// Markers in working-set order (empty on failure or empty map).
    pub items: Vec<MapMarkerItem>,
    /// Snapshot elements filtered out (unpositioned or tombstoned).
    pub skipped: u32,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for map command flow.
#[derive(Debug, Clone, PartialEq)]
pub struct MapActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Optional affected pin ID.
    pub pin_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl MapActionResponse {
    fn success(message: impl Into<String>, pin_id: String) -> Self {
        Self {
            ok: true,
            pin_id: Some(pin_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            pin_id: None,
            message: message.into(),
        }
    }
}

/// Creates one positioned pin from the map's long-press flow.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns operation result and created pin ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn map_drop_pin(title: String, lat: f64, lng: f64) -> MapActionResponse {
    let pin = Pin::new(title.trim().to_string()).at(lat, lng);
    match with_pin_repo(|repo| repo.create_pin(&pin)) {
        Ok(pin_id) => MapActionResponse::success("Pin dropped.", pin_id.to_string()),
        Err(err) => MapActionResponse::failure(format!("map_drop_pin failed: {err}")),
    }
}

/// Soft-deletes one pin so the next refresh removes its marker.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns operation result with the removed pin ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn map_remove_pin(pin_id: String) -> MapActionResponse {
    let id = match parse_pin_id(&pin_id) {
        Ok(id) => id,
        Err(message) => return MapActionResponse::failure(message),
    };

    match with_pin_repo(|repo| repo.soft_delete_pin(id)) {
        Ok(()) => MapActionResponse::success("Pin removed.", id.to_string()),
        Err(err) => MapActionResponse::failure(format!("map_remove_pin failed: {err}")),
    }
}

/// Rebuilds the clustered marker set from current pin storage.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns deterministic marker rows in working-set order.
#[flutter_rust_bridge::frb(sync)]
pub fn map_markers() -> MapMarkersResponse {
    let db_path = resolve_map_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            return MapMarkersResponse {
                items: Vec::new(),
                skipped: 0,
                message: format!("map_markers failed: {err}"),
            };
        }
    };

    let mut service =
        MapSyncService::new(SqlitePinRepository::new(&conn), DirectRenderEngine::new());
    let outcome = match service.refresh_from_storage(&PinListQuery::default()) {
        Ok(outcome) => outcome,
        Err(err) => {
            return MapMarkersResponse {
                items: Vec::new(),
                skipped: 0,
                message: format!("map_markers failed: {err}"),
            };
        }
    };

    let engine = service.manager().engine();
    let items = engine
        .items()
        .iter()
        .zip(engine.markers())
        .map(|(item, marker)| MapMarkerItem {
            pin_id: item.entity_id().to_string(),
            lat: marker.position.lat,
            lng: marker.position.lng,
            title: marker.title.clone().unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    info!(
        "event=ffi_map_markers module=ffi status=ok markers={} skipped={}",
        items.len(),
        outcome.skipped
    );

    MapMarkersResponse {
        skipped: outcome.skipped as u32,
        message: if items.is_empty() {
            "No markers.".to_string()
        } else {
            format!("{} marker(s).", items.len())
        },
        items,
    }
}

fn parse_pin_id(raw: &str) -> Result<PinId, String> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid pin id: `{raw}`"))
}

fn resolve_map_db_path() -> PathBuf {
    MAP_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("PINMAP_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(MAP_DB_FILE_NAME)
        })
        .clone()
}

fn with_pin_repo<T>(
    f: impl FnOnce(&SqlitePinRepository<'_>) -> pinmap_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_map_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("map DB open failed: {err}"))?;
    let repo = SqlitePinRepository::new(&conn);
    f(&repo).map_err(|err| err.to_string())
}
