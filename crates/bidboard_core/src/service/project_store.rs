//! Project store: the single source of truth for projects and task boards.
//!
//! # Responsibility
//! - Own the in-memory project list and per-project task lists.
//! - Load both collections from key-value storage, falling back to seed data.
//! - Apply every mutation, persist the affected snapshot, notify subscribers.
//!
//! # Invariants
//! - A task list only exists for a project that exists; deleting a project
//!   drops its list in the same call.
//! - Task ids are unique within a project's list. New ids never collide with
//!   existing ones; ids are not unique across projects.
//! - Missing ids resolve to `MutationOutcome::NotFound`, never to a panic.
//! - Storage write failures leave in-memory state authoritative and are
//!   reported through a `PersistFailed` event.

use crate::board::{derive_board, Board, MoveRequest};
use crate::model::project::{NewProject, Project, ProjectId, ProjectStatus, ProjectUpdate};
use crate::model::task::{Attachment, NewTask, Task, TaskId, TaskMap, TaskStatus, TeamMemberId};
use crate::model::team::TeamMember;
use crate::notify::{Notification, StoreChange, StoreEvent, SubscriptionId, Subscribers};
use crate::repo::kv_repo::KvStore;
use crate::repo::snapshot::{self, SnapshotResult, PROJECTS_KEY, TASKS_KEY};
use crate::seed::SeedProvider;
use log::{debug, error, info, warn};
use std::time::Instant;
use uuid::Uuid;

/// Result of a mutation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// State changed, was persisted and announced.
    Applied,
    /// Target exists but the request would not change anything.
    Unchanged,
    /// Target project, task or attachment does not exist.
    NotFound,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Where a collection came from when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Storage,
    Seed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub projects: SnapshotSource,
    pub tasks: SnapshotSource,
}

/// Owned copy of both collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub projects: Vec<Project>,
    pub tasks: TaskMap,
}

/// Project store over injected storage and seed data.
pub struct ProjectStore<K: KvStore, S: SeedProvider> {
    kv: K,
    seed: S,
    projects: Vec<Project>,
    tasks: TaskMap,
    team: Vec<TeamMember>,
    load_report: LoadReport,
    subscribers: Subscribers,
    /// Keys whose last write failed, announced after the triggering change.
    failed_writes: Vec<&'static str>,
}

impl<K: KvStore, S: SeedProvider> ProjectStore<K, S> {
    /// Opens the store, loading each collection from `kv` or from `seed`.
    ///
    /// Never fails: absent, unreadable or invalid snapshots fall back to seed
    /// data per key.
    pub fn open(kv: K, seed: S) -> Self {
        let started_at = Instant::now();
        let (projects, projects_source) =
            load_or_seed(PROJECTS_KEY, snapshot::read_projects(&kv), || seed.projects());
        let (mut tasks, tasks_source) =
            load_or_seed(TASKS_KEY, snapshot::read_tasks(&kv), || seed.tasks());
        drop_orphan_lists(&projects, &mut tasks);
        let team = seed.team_members();

        info!(
            "event=store_open module=store status=ok projects={} task_lists={} duration_ms={}",
            projects.len(),
            tasks.len(),
            started_at.elapsed().as_millis()
        );

        Self {
            kv,
            seed,
            projects,
            tasks,
            team,
            load_report: LoadReport {
                projects: projects_source,
                tasks: tasks_source,
            },
            subscribers: Subscribers::new(),
            failed_writes: Vec::new(),
        }
    }

    pub fn load_report(&self) -> LoadReport {
        self.load_report
    }

    /// Backing key-value storage.
    pub fn storage(&self) -> &K {
        &self.kv
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn task_map(&self) -> &TaskMap {
        &self.tasks
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            projects: self.projects.clone(),
            tasks: self.tasks.clone(),
        }
    }

    pub fn get_project_by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Tasks of `project_id` in list order; empty when the project has none.
    pub fn get_tasks_for_project(&self, project_id: &str) -> &[Task] {
        self.tasks
            .get(project_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get_task(&self, project_id: &str, task_id: &str) -> Option<&Task> {
        self.get_tasks_for_project(project_id)
            .iter()
            .find(|task| task.id == task_id)
    }

    /// Projects matching `status` (any when `None`) whose name contains
    /// `search` case-insensitively (any when empty), in insertion order.
    pub fn filter_projects(&self, status: Option<ProjectStatus>, search: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|project| status.map_or(true, |wanted| project.status == wanted))
            .filter(|project| project.name_contains(search))
            .collect()
    }

    /// Stage x status board of one project.
    pub fn board(&self, project_id: &str) -> Board<'_> {
        derive_board(self.get_tasks_for_project(project_id))
    }

    pub fn team_members(&self) -> &[TeamMember] {
        &self.team
    }

    /// Team member assigned to `task`, if the id resolves.
    pub fn assignee_of(&self, task: &Task) -> Option<&TeamMember> {
        let assignee = task.assignee.as_deref()?;
        self.team.iter().find(|member| member.id == assignee)
    }

    /// Registers a listener invoked after every applied mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Adds a project with a fresh id and the full default task set.
    pub fn add_project(&mut self, data: NewProject) -> ProjectId {
        let id = self.fresh_project_id();
        let project = data.into_project(id.clone());
        let description = format!("{} har lagts till", project.name);

        self.projects.push(project);
        self.tasks.insert(id.clone(), self.seed.default_task_set());

        self.persist_projects();
        self.persist_tasks();
        self.publish(
            StoreChange::ProjectAdded {
                project_id: id.clone(),
            },
            Notification::info("Projekt tillagt", description),
        );
        id
    }

    /// Applies typed update commands to one project, persisting once.
    pub fn update_project(&mut self, id: &str, updates: &[ProjectUpdate]) -> MutationOutcome {
        let Some(project) = self.projects.iter_mut().find(|project| project.id == id) else {
            return not_found("update_project", id, None);
        };

        let before = project.clone();
        for update in updates {
            project.apply(update);
        }
        if *project == before {
            return MutationOutcome::Unchanged;
        }

        self.persist_projects();
        self.publish(
            StoreChange::ProjectUpdated {
                project_id: id.to_string(),
            },
            Notification::info("Projekt uppdaterat", "Projektinformationen har uppdaterats"),
        );
        MutationOutcome::Applied
    }

    /// Removes a project together with its task list.
    pub fn delete_project(&mut self, id: &str) -> MutationOutcome {
        let Some(position) = self.projects.iter().position(|project| project.id == id) else {
            return not_found("delete_project", id, None);
        };
        self.projects.remove(position);
        self.tasks.remove(id);

        self.persist_projects();
        self.persist_tasks();
        self.publish(
            StoreChange::ProjectDeleted {
                project_id: id.to_string(),
            },
            Notification::info("Projekt borttaget", "Projektet har tagits bort"),
        );
        MutationOutcome::Applied
    }

    /// Appends a task to an existing project; `None` for unknown projects.
    pub fn add_task(&mut self, project_id: &str, data: NewTask) -> Option<TaskId> {
        if self.get_project_by_id(project_id).is_none() {
            not_found("add_task", project_id, None);
            return None;
        }

        let task_id = self.fresh_task_id(project_id);
        let description = format!("{} har lagts till", data.name);
        let task = Task::new(
            task_id.clone(),
            data.name,
            data.description,
            data.stage,
            data.status,
        );
        self.tasks
            .entry(project_id.to_string())
            .or_default()
            .push(task);

        self.persist_tasks();
        self.publish(
            StoreChange::TaskAdded {
                project_id: project_id.to_string(),
                task_id: task_id.clone(),
            },
            Notification::info("Uppgift tillagd", description),
        );
        Some(task_id)
    }

    pub fn remove_task(&mut self, project_id: &str, task_id: &str) -> MutationOutcome {
        let Some(tasks) = self.tasks.get_mut(project_id) else {
            return not_found("remove_task", project_id, Some(task_id));
        };
        let Some(position) = tasks.iter().position(|task| task.id == task_id) else {
            return not_found("remove_task", project_id, Some(task_id));
        };
        tasks.remove(position);

        self.persist_tasks();
        self.publish(
            StoreChange::TaskRemoved {
                project_id: project_id.to_string(),
                task_id: task_id.to_string(),
            },
            Notification::info("Uppgift borttagen", "Uppgiften har tagits bort"),
        );
        MutationOutcome::Applied
    }

    pub fn update_task_status(
        &mut self,
        project_id: &str,
        task_id: &str,
        status: TaskStatus,
    ) -> MutationOutcome {
        let notification = Notification::info(
            "Status uppdaterad",
            format!("Uppgiftsstatus har ändrats till {}", status.label()),
        );
        self.set_status("update_task_status", project_id, task_id, status, notification)
    }

    /// Sets or clears the assignee. The id is not checked against the roster.
    pub fn update_task_assignee(
        &mut self,
        project_id: &str,
        task_id: &str,
        assignee: Option<TeamMemberId>,
    ) -> MutationOutcome {
        let Some(task) = self.task_mut(project_id, task_id) else {
            return not_found("update_task_assignee", project_id, Some(task_id));
        };
        if task.assignee == assignee {
            return MutationOutcome::Unchanged;
        }
        task.assignee = assignee.clone();

        self.persist_tasks();
        self.publish(
            StoreChange::TaskAssigneeChanged {
                project_id: project_id.to_string(),
                task_id: task_id.to_string(),
                assignee,
            },
            Notification::info(
                "Ansvarig uppdaterad",
                "Uppgiftens ansvariga person har uppdaterats",
            ),
        );
        MutationOutcome::Applied
    }

    pub fn update_task_description(
        &mut self,
        project_id: &str,
        task_id: &str,
        description: impl Into<String>,
    ) -> MutationOutcome {
        let description = description.into();
        let Some(task) = self.task_mut(project_id, task_id) else {
            return not_found("update_task_description", project_id, Some(task_id));
        };
        if task.description == description {
            return MutationOutcome::Unchanged;
        }
        task.description = description;

        self.persist_tasks();
        self.publish(
            StoreChange::TaskDescriptionChanged {
                project_id: project_id.to_string(),
                task_id: task_id.to_string(),
            },
            Notification::info("Beskrivning uppdaterad", "Uppgiftsbeskrivningen har uppdaterats"),
        );
        MutationOutcome::Applied
    }

    /// Moves a task between status columns.
    ///
    /// `source` is advisory: a mismatch with the task's current status is
    /// logged and the move still applies.
    pub fn move_task(
        &mut self,
        project_id: &str,
        task_id: &str,
        source: TaskStatus,
        destination: TaskStatus,
    ) -> MutationOutcome {
        if source == destination {
            return MutationOutcome::Unchanged;
        }
        if let Some(task) = self.get_task(project_id, task_id) {
            if task.status != source {
                warn!(
                    "event=task_move module=store status=source_mismatch project_id={} task_id={} expected={} actual={}",
                    project_id,
                    task_id,
                    source.as_str(),
                    task.status.as_str()
                );
            }
        }
        let notification = Notification::info(
            "Uppgift flyttad",
            format!("Uppgiften har flyttats till {}", destination.label()),
        );
        self.set_status("move_task", project_id, task_id, destination, notification)
    }

    /// Applies a move produced by board drag interpretation.
    pub fn apply_move(&mut self, project_id: &str, request: &MoveRequest) -> MutationOutcome {
        self.move_task(
            project_id,
            &request.task_id,
            request.source,
            request.destination,
        )
    }

    /// Appends an attachment; a repeated attachment id is left as is.
    pub fn add_attachment(
        &mut self,
        project_id: &str,
        task_id: &str,
        attachment: Attachment,
    ) -> MutationOutcome {
        let Some(task) = self.task_mut(project_id, task_id) else {
            return not_found("add_attachment", project_id, Some(task_id));
        };
        if task.attachments.iter().any(|existing| existing.id == attachment.id) {
            return MutationOutcome::Unchanged;
        }
        let attachment_id = attachment.id.clone();
        let description = format!("{} har lagts till", attachment.name);
        task.attachments.push(attachment);

        self.persist_tasks();
        self.publish(
            StoreChange::AttachmentAdded {
                project_id: project_id.to_string(),
                task_id: task_id.to_string(),
                attachment_id,
            },
            Notification::info("Bilaga tillagd", description),
        );
        MutationOutcome::Applied
    }

    pub fn remove_attachment(
        &mut self,
        project_id: &str,
        task_id: &str,
        attachment_id: &str,
    ) -> MutationOutcome {
        let Some(task) = self.task_mut(project_id, task_id) else {
            return not_found("remove_attachment", project_id, Some(task_id));
        };
        let Some(position) = task
            .attachments
            .iter()
            .position(|attachment| attachment.id == attachment_id)
        else {
            return not_found("remove_attachment", project_id, Some(task_id));
        };
        task.attachments.remove(position);

        self.persist_tasks();
        self.publish(
            StoreChange::AttachmentRemoved {
                project_id: project_id.to_string(),
                task_id: task_id.to_string(),
                attachment_id: attachment_id.to_string(),
            },
            Notification::info("Bilaga borttagen", "Bilagan har tagits bort"),
        );
        MutationOutcome::Applied
    }

    fn set_status(
        &mut self,
        op: &str,
        project_id: &str,
        task_id: &str,
        status: TaskStatus,
        notification: Notification,
    ) -> MutationOutcome {
        let Some(task) = self.task_mut(project_id, task_id) else {
            return not_found(op, project_id, Some(task_id));
        };
        if task.status == status {
            return MutationOutcome::Unchanged;
        }
        task.status = status;

        self.persist_tasks();
        self.publish(
            StoreChange::TaskStatusChanged {
                project_id: project_id.to_string(),
                task_id: task_id.to_string(),
                status,
            },
            notification,
        );
        MutationOutcome::Applied
    }

    fn task_mut(&mut self, project_id: &str, task_id: &str) -> Option<&mut Task> {
        self.tasks
            .get_mut(project_id)?
            .iter_mut()
            .find(|task| task.id == task_id)
    }

    fn fresh_project_id(&self) -> ProjectId {
        loop {
            let candidate = Uuid::new_v4().to_string();
            let taken = self.projects.iter().any(|project| project.id == candidate)
                || self.tasks.contains_key(&candidate);
            if !taken {
                return candidate;
            }
        }
    }

    fn fresh_task_id(&self, project_id: &str) -> TaskId {
        loop {
            let candidate = Uuid::new_v4().to_string();
            if self.get_task(project_id, &candidate).is_none() {
                return candidate;
            }
        }
    }

    fn persist_projects(&mut self) {
        let result = snapshot::write_projects(&self.kv, &self.projects);
        self.report_persist(PROJECTS_KEY, result);
    }

    fn persist_tasks(&mut self) {
        let result = snapshot::write_tasks(&self.kv, &self.tasks);
        self.report_persist(TASKS_KEY, result);
    }

    fn report_persist(&mut self, key: &'static str, result: SnapshotResult<()>) {
        match result {
            Ok(()) => debug!("event=store_persist module=store status=ok key={key}"),
            Err(err) => {
                error!("event=store_persist module=store status=error key={key} error={err}");
                self.failed_writes.push(key);
            }
        }
    }

    /// Announces `change`, then any write failures it caused.
    fn publish(&mut self, change: StoreChange, notification: Notification) {
        self.emit(change, notification);
        for key in std::mem::take(&mut self.failed_writes) {
            self.emit(
                StoreChange::PersistFailed { key },
                Notification::error("Kunde inte spara", "Ändringen gäller bara denna session"),
            );
        }
    }

    fn emit(&mut self, change: StoreChange, notification: Notification) {
        debug!(
            "event=store_change module=store status=ok change={} listeners={}",
            change.event_name(),
            self.subscribers.len()
        );
        self.subscribers.publish(&StoreEvent {
            change,
            notification,
        });
    }
}

/// Removes task lists whose project is not in `projects`.
///
/// The two keys load independently, so one falling back to seed data can
/// leave the other pointing at projects that no longer exist.
fn drop_orphan_lists(projects: &[Project], tasks: &mut TaskMap) {
    tasks.retain(|project_id, list| {
        let owned = projects.iter().any(|project| &project.id == project_id);
        if !owned {
            warn!(
                "event=store_load module=store status=orphan_tasks project_id={} tasks={}",
                project_id,
                list.len()
            );
        }
        owned
    });
}

fn load_or_seed<T>(
    key: &'static str,
    loaded: SnapshotResult<Option<T>>,
    seed: impl FnOnce() -> T,
) -> (T, SnapshotSource) {
    match loaded {
        Ok(Some(value)) => (value, SnapshotSource::Storage),
        Ok(None) => {
            info!("event=store_load module=store status=seed key={key} reason=absent");
            (seed(), SnapshotSource::Seed)
        }
        Err(err) => {
            warn!("event=store_load module=store status=seed key={key} reason=unreadable error={err}");
            (seed(), SnapshotSource::Seed)
        }
    }
}

fn not_found(op: &str, project_id: &str, task_id: Option<&str>) -> MutationOutcome {
    debug!(
        "event=store_mutation module=store status=not_found op={} project_id={} task_id={}",
        op,
        project_id,
        task_id.unwrap_or("-")
    );
    MutationOutcome::NotFound
}
