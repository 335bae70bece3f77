//! Domain model for bid projects, pipeline tasks and project discussion.
//!
//! # Responsibility
//! - Define canonical records shared by the store, board and seed layers.
//! - Own the enumerated field domains and their wire/display names.
//!
//! # Invariants
//! - Stage order and task status order are fixed and total.
//! - Wire names never change once persisted; display labels may.

pub mod discussion;
pub mod project;
pub mod task;
pub mod team;
