//! Live result set contracts consumed by map clustering.
//!
//! # Responsibility
//! - Define the inbound snapshot shape the cluster sync manager refreshes
//!   from.
//! - Keep degraded result-set states (invalidated, not yet loaded)
//!   representable instead of collapsing them into "empty".

pub mod live_results;
