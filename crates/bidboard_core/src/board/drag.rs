//! Drag-and-drop interpretation.
//!
//! The gesture itself is handled by the UI; this module only turns a finished
//! drop into a status move the store can apply.

use crate::model::task::{Stage, TaskId, TaskStatus};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Board cell addressed by a droppable id of the form `{stage}-{status}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropTarget {
    pub stage: Stage,
    pub status: TaskStatus,
}

impl DropTarget {
    pub fn new(stage: Stage, status: TaskStatus) -> Self {
        Self { stage, status }
    }

    /// Droppable id rendered on the board cell.
    pub fn droppable_id(self) -> String {
        format!("{}-{}", self.stage.as_str(), self.status.as_str())
    }

    /// Parses a droppable id.
    ///
    /// Stage names never contain `-`, so the first hyphen separates the parts;
    /// the status part may itself contain one (`in-progress`).
    pub fn parse(droppable_id: &str) -> Result<Self, DropError> {
        let (stage_text, status_text) = droppable_id
            .split_once('-')
            .ok_or_else(|| DropError::MalformedDroppable(droppable_id.to_string()))?;
        let stage = Stage::parse(stage_text)
            .ok_or_else(|| DropError::UnknownStage(stage_text.to_string()))?;
        let status = TaskStatus::parse(status_text)
            .ok_or_else(|| DropError::UnknownStatus(status_text.to_string()))?;
        Ok(Self { stage, status })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropLocation<'a> {
    pub droppable_id: &'a str,
    pub index: usize,
}

/// Finished drag gesture as reported by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent<'a> {
    /// Dragged task id.
    pub draggable_id: &'a str,
    pub source: DropLocation<'a>,
    /// `None` when the card was dropped outside any column.
    pub destination: Option<DropLocation<'a>>,
}

/// Status move to apply through the store's `move_task`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub task_id: TaskId,
    pub source: TaskStatus,
    pub destination: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropError {
    MalformedDroppable(String),
    UnknownStage(String),
    UnknownStatus(String),
    /// Cards only move between status columns of their own stage row.
    CrossStage { from: Stage, to: Stage },
}

impl Display for DropError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedDroppable(value) => write!(f, "malformed droppable id `{value}`"),
            Self::UnknownStage(value) => write!(f, "unknown stage `{value}`"),
            Self::UnknownStatus(value) => write!(f, "unknown task status `{value}`"),
            Self::CrossStage { from, to } => write!(
                f,
                "cannot move a task from stage `{}` to stage `{}`",
                from.as_str(),
                to.as_str()
            ),
        }
    }
}

impl Error for DropError {}

/// Turns a drop into a move request.
///
/// Returns `Ok(None)` when nothing should change: no destination, the card
/// was put back where it was, or it was reordered inside the same column.
pub fn interpret_drop(event: &DropEvent<'_>) -> Result<Option<MoveRequest>, DropError> {
    let Some(destination) = event.destination else {
        return Ok(None);
    };
    if destination == event.source {
        return Ok(None);
    }

    let from = DropTarget::parse(event.source.droppable_id)?;
    let to = DropTarget::parse(destination.droppable_id)?;
    if from.stage != to.stage {
        return Err(DropError::CrossStage {
            from: from.stage,
            to: to.stage,
        });
    }
    if from.status == to.status {
        return Ok(None);
    }

    Ok(Some(MoveRequest {
        task_id: event.draggable_id.to_string(),
        source: from.status,
        destination: to.status,
    }))
}
