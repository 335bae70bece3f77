//! Persistence layer for durable store snapshots.
//!
//! # Responsibility
//! - Define the key-value contract the project store writes through.
//! - Isolate SQLite and JSON encoding details from the store.
//!
//! # Invariants
//! - Snapshot reads validate identity invariants before handing data out.
//! - Repository APIs report failures as values; callers decide on fallback.

pub mod kv_repo;
pub mod snapshot;
