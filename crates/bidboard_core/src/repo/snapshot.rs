//! JSON snapshot codec for the two durable collections.
//!
//! # Responsibility
//! - Encode/decode the project list and the task map under fixed keys.
//! - Reject snapshots that break identity invariants.
//!
//! # Invariants
//! - `projects` holds a JSON array of projects with unique ids.
//! - `tasks` holds a JSON object of project id -> task array; task ids are
//!   unique within each array.
//! - The two keys are written independently; there is no cross-key atomicity.

use crate::model::project::{Project, ProjectId};
use crate::model::task::{TaskId, TaskMap};
use crate::repo::kv_repo::{KvStore, RepoError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PROJECTS_KEY: &str = "projects";
pub const TASKS_KEY: &str = "tasks";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug)]
pub enum SnapshotError {
    Repo(RepoError),
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
    DuplicateProjectId(ProjectId),
    DuplicateTaskId {
        project_id: ProjectId,
        task_id: TaskId,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Decode { key, source } => write!(f, "cannot decode `{key}` snapshot: {source}"),
            Self::Encode { key, source } => write!(f, "cannot encode `{key}` snapshot: {source}"),
            Self::DuplicateProjectId(id) => write!(f, "duplicate project id in snapshot: {id}"),
            Self::DuplicateTaskId {
                project_id,
                task_id,
            } => write!(
                f,
                "duplicate task id `{task_id}` in snapshot for project {project_id}"
            ),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::DuplicateProjectId(_) | Self::DuplicateTaskId { .. } => None,
        }
    }
}

impl From<RepoError> for SnapshotError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Reads the project list; `Ok(None)` when the key was never written.
pub fn read_projects<K: KvStore + ?Sized>(kv: &K) -> SnapshotResult<Option<Vec<Project>>> {
    let Some(raw) = kv.get(PROJECTS_KEY)? else {
        return Ok(None);
    };
    let projects: Vec<Project> =
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Decode {
            key: PROJECTS_KEY,
            source,
        })?;

    let mut seen = HashSet::new();
    for project in &projects {
        if !seen.insert(project.id.as_str()) {
            return Err(SnapshotError::DuplicateProjectId(project.id.clone()));
        }
    }
    Ok(Some(projects))
}

/// Reads the task map; `Ok(None)` when the key was never written.
pub fn read_tasks<K: KvStore + ?Sized>(kv: &K) -> SnapshotResult<Option<TaskMap>> {
    let Some(raw) = kv.get(TASKS_KEY)? else {
        return Ok(None);
    };
    let tasks: TaskMap = serde_json::from_str(&raw).map_err(|source| SnapshotError::Decode {
        key: TASKS_KEY,
        source,
    })?;
    check_task_ids(&tasks)?;
    Ok(Some(tasks))
}

pub fn write_projects<K: KvStore + ?Sized>(kv: &K, projects: &[Project]) -> SnapshotResult<()> {
    let encoded = encode_projects(projects)?;
    kv.put(PROJECTS_KEY, &encoded)?;
    Ok(())
}

pub fn write_tasks<K: KvStore + ?Sized>(kv: &K, tasks: &TaskMap) -> SnapshotResult<()> {
    let encoded = encode_tasks(tasks)?;
    kv.put(TASKS_KEY, &encoded)?;
    Ok(())
}

pub fn encode_projects(projects: &[Project]) -> SnapshotResult<String> {
    serde_json::to_string(projects).map_err(|source| SnapshotError::Encode {
        key: PROJECTS_KEY,
        source,
    })
}

pub fn encode_tasks(tasks: &TaskMap) -> SnapshotResult<String> {
    serde_json::to_string(tasks).map_err(|source| SnapshotError::Encode {
        key: TASKS_KEY,
        source,
    })
}

/// Fails on the first task id that repeats inside one project's list.
pub fn check_task_ids(tasks: &TaskMap) -> SnapshotResult<()> {
    for (project_id, project_tasks) in tasks {
        let mut seen = HashSet::new();
        for task in project_tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(SnapshotError::DuplicateTaskId {
                    project_id: project_id.clone(),
                    task_id: task.id.clone(),
                });
            }
        }
    }
    Ok(())
}
