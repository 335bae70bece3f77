//! Store and session services consumed by the views.
//!
//! # Responsibility
//! - Own authoritative in-memory state and route writes to storage.
//! - Keep views decoupled from snapshot encoding and key-value details.

pub mod discussion;
pub mod project_store;
