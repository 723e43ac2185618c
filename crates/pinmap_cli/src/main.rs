//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pinmap_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use pinmap_core::db::open_db_in_memory;
use pinmap_core::{
    DirectRenderEngine, MapSyncService, Pin, PinListQuery, PinRepository, SqlitePinRepository,
};

fn main() {
    println!("pinmap_core ping={}", pinmap_core::ping());
    println!("pinmap_core version={}", pinmap_core::core_version());

    // Tiny in-memory probe: two pins in, one unplaced, one marker out.
    match smoke_refresh() {
        Ok((clustered, skipped)) => {
            println!("pinmap_core smoke clustered={clustered} skipped={skipped}");
        }
        Err(err) => {
            eprintln!("pinmap_core smoke failed: {err}");
            std::process::exit(1);
        }
    }
}

fn smoke_refresh() -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqlitePinRepository::new(&conn);
    repo.create_pin(&Pin::new("probe marker").at(52.52, 13.405))?;
    repo.create_pin(&Pin::new("unplaced probe"))?;

    let mut service =
        MapSyncService::new(SqlitePinRepository::new(&conn), DirectRenderEngine::new());
    let outcome = service.refresh_from_storage(&PinListQuery::default())?;
    Ok((outcome.clustered, outcome.skipped))
}
