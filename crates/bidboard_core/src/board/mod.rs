//! Kanban board derivation.
//!
//! # Responsibility
//! - Group a project's tasks into stage rows and status columns.
//! - Interpret finished drag-and-drop gestures as status moves.
//!
//! # Invariants
//! - All nine stage rows and all four status columns are always present.
//! - A task lands in exactly one cell: `(task.stage, task.status)`.
//! - Derivation is pure; the same input yields the same board.

pub mod drag;
pub mod layout;

pub use drag::{interpret_drop, DropError, DropEvent, DropLocation, DropTarget, MoveRequest};
pub use layout::{derive_board, Board, Progress, StageRow, StatusColumn};
