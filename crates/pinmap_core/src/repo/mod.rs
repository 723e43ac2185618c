//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for pins.
//! - Isolate SQLite query details from clustering orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Pin::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod pin_repo;
