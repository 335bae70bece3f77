//! Store change notifications.
//!
//! # Responsibility
//! - Describe every applied store mutation as a typed event.
//! - Carry a short user-facing message (title + description) per event.
//! - Keep an ordered observer registry with subscribe/unsubscribe.
//!
//! # Invariants
//! - Listeners run synchronously, in subscription order.
//! - Subscription ids are never reused within one registry.
//! - Notifications are a side channel; no store state depends on them.

use crate::model::project::ProjectId;
use crate::model::task::{TaskId, TaskStatus, TeamMemberId};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// Handle returned by `subscribe`, used to unsubscribe.
pub type SubscriptionId = u64;

/// Observer callback.
pub type Listener = Box<dyn FnMut(&StoreEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient message intended for on-screen display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// What changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    ProjectAdded {
        project_id: ProjectId,
    },
    ProjectUpdated {
        project_id: ProjectId,
    },
    ProjectDeleted {
        project_id: ProjectId,
    },
    TaskAdded {
        project_id: ProjectId,
        task_id: TaskId,
    },
    TaskRemoved {
        project_id: ProjectId,
        task_id: TaskId,
    },
    TaskStatusChanged {
        project_id: ProjectId,
        task_id: TaskId,
        status: TaskStatus,
    },
    TaskAssigneeChanged {
        project_id: ProjectId,
        task_id: TaskId,
        assignee: Option<TeamMemberId>,
    },
    TaskDescriptionChanged {
        project_id: ProjectId,
        task_id: TaskId,
    },
    AttachmentAdded {
        project_id: ProjectId,
        task_id: TaskId,
        attachment_id: String,
    },
    AttachmentRemoved {
        project_id: ProjectId,
        task_id: TaskId,
        attachment_id: String,
    },
    /// A snapshot write failed; in-memory state is still current.
    PersistFailed {
        key: &'static str,
    },
}

impl StoreChange {
    /// Stable snake_case name used in log lines.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::ProjectAdded { .. } => "project_added",
            Self::ProjectUpdated { .. } => "project_updated",
            Self::ProjectDeleted { .. } => "project_deleted",
            Self::TaskAdded { .. } => "task_added",
            Self::TaskRemoved { .. } => "task_removed",
            Self::TaskStatusChanged { .. } => "task_status_changed",
            Self::TaskAssigneeChanged { .. } => "task_assignee_changed",
            Self::TaskDescriptionChanged { .. } => "task_description_changed",
            Self::AttachmentAdded { .. } => "attachment_added",
            Self::AttachmentRemoved { .. } => "attachment_removed",
            Self::PersistFailed { .. } => "persist_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub change: StoreChange,
    pub notification: Notification,
}

/// Ordered observer registry.
#[derive(Default)]
pub struct Subscribers {
    next_id: SubscriptionId,
    listeners: BTreeMap<SubscriptionId, Listener>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn publish(&mut self, event: &StoreEvent) {
        for listener in self.listeners.values_mut() {
            listener(event);
        }
    }
}

impl Debug for Subscribers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
