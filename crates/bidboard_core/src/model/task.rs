//! Pipeline task domain model.
//!
//! # Responsibility
//! - Define tasks, their stage/status domains and attachments.
//!
//! # Invariants
//! - `Stage::ALL` is the pipeline order; `TaskStatus::ALL` is the column order.
//! - A task id is unique inside the task list of its project.
//! - Attachments are owned by exactly one task.

use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Task identifier, unique within one project's task list.
pub type TaskId = String;

/// Reference to a team member; lookup only, no ownership.
pub type TeamMemberId = String;

/// Task lists keyed by owning project.
pub type TaskMap = BTreeMap<ProjectId, Vec<Task>>;

/// Kanban column state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    Blocked,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Column order on the board.
    pub const ALL: [TaskStatus; 4] = [Self::Todo, Self::Blocked, Self::InProgress, Self::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Blocked => "blocked",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Column heading shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "Att göra",
            Self::Blocked => "Blockerat",
            Self::InProgress => "Pågående",
            Self::Done => "Klart",
        }
    }

    /// Parses the wire value or the column heading.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL.into_iter().find(|status| {
            status.as_str().eq_ignore_ascii_case(trimmed)
                || status.label().to_lowercase() == trimmed.to_lowercase()
        })
    }

    /// Zero-based column index.
    pub fn position(self) -> usize {
        self as usize
    }
}

/// One of the nine phases of the bid-to-handover pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Anbudsstart")]
    BidKickoff,
    #[serde(rename = "Projektråd")]
    ProjectCouncil,
    #[serde(rename = "Kalkylarbete")]
    Estimating,
    #[serde(rename = "Anbudsgenomgång")]
    BidReview,
    #[serde(rename = "Anbudsråd")]
    BidCouncil,
    #[serde(rename = "Anbudsinlämning")]
    BidSubmission,
    #[serde(rename = "Anbudsbesked")]
    BidDecision,
    #[serde(rename = "Signerat kontrakt")]
    SignedContract,
    #[serde(rename = "Överlämning")]
    Handover,
}

impl Stage {
    /// Pipeline order.
    pub const ALL: [Stage; 9] = [
        Self::BidKickoff,
        Self::ProjectCouncil,
        Self::Estimating,
        Self::BidReview,
        Self::BidCouncil,
        Self::BidSubmission,
        Self::BidDecision,
        Self::SignedContract,
        Self::Handover,
    ];

    /// Wire value, which doubles as the row heading.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BidKickoff => "Anbudsstart",
            Self::ProjectCouncil => "Projektråd",
            Self::Estimating => "Kalkylarbete",
            Self::BidReview => "Anbudsgenomgång",
            Self::BidCouncil => "Anbudsråd",
            Self::BidSubmission => "Anbudsinlämning",
            Self::BidDecision => "Anbudsbesked",
            Self::SignedContract => "Signerat kontrakt",
            Self::Handover => "Överlämning",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL.into_iter().find(|stage| stage.as_str() == trimmed)
    }

    /// Zero-based row index.
    pub fn position(self) -> usize {
        self as usize
    }
}

/// Name-only file reference attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Serialized as `type`; `document` for everything added from the UI.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Attachment {
    /// Builds a placeholder document attachment with a fresh id.
    ///
    /// No file is uploaded; `url` is a dead link marker.
    pub fn document(name: impl Into<String>) -> Self {
        Self {
            id: format!("att-{}", Uuid::new_v4()),
            name: name.into(),
            url: "#".to_string(),
            kind: "document".to_string(),
        }
    }
}

/// Canonical pipeline task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub stage: Stage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<TeamMemberId>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Task {
    /// Creates a task with no assignee and no attachments.
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        description: impl Into<String>,
        stage: Stage,
        status: TaskStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            status,
            stage,
            assignee: None,
            attachments: Vec::new(),
        }
    }
}

/// Input for adding a single task from the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub stage: Stage,
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(TaskStatus::parse("Pågående"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("DONE"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse("later"), None);
    }

    #[test]
    fn stage_positions_follow_pipeline_order() {
        for (index, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.position(), index);
            assert_eq!(Stage::parse(stage.as_str()), Some(*stage));
        }
        assert_eq!(
            serde_json::to_string(&Stage::SignedContract).unwrap(),
            "\"Signerat kontrakt\""
        );
    }

    #[test]
    fn task_without_assignee_omits_field_and_reads_back() {
        let task = Task::new("t1", "Kalkylering", "", Stage::Estimating, TaskStatus::Todo);
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("assignee"));
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn document_attachment_serializes_kind_as_type() {
        let attachment = Attachment::document("ritning.pdf");
        assert!(attachment.id.starts_with("att-"));
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["type"], "document");
        assert_eq!(json["url"], "#");
    }
}
