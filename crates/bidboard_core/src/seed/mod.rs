//! Seed data provider.
//!
//! # Responsibility
//! - Supply the initial projects and task boards when no snapshot exists.
//! - Supply the per-stage task templates used for every new project.
//! - Supply the team roster used for assignee lookup.
//!
//! # Invariants
//! - Seed data is read-only; callers receive owned copies.
//! - Template task ids are unique within one generated task list.

pub mod catalog;
pub mod templates;

use crate::model::project::Project;
use crate::model::task::{Stage, Task, TaskMap, TaskStatus};
use crate::model::team::TeamMember;

/// Source of bootstrap data injected into the project store.
pub trait SeedProvider {
    /// Projects used when no `projects` snapshot can be loaded.
    fn projects(&self) -> Vec<Project>;

    /// Task map used when no `tasks` snapshot can be loaded.
    fn tasks(&self) -> TaskMap;

    /// Template tasks for one stage, all with `status`.
    fn default_tasks_for_stage(&self, stage: Stage, status: TaskStatus) -> Vec<Task>;

    fn team_members(&self) -> Vec<TeamMember>;

    /// Full nine-stage task list given to a newly added project.
    fn default_task_set(&self) -> Vec<Task> {
        Stage::ALL
            .into_iter()
            .flat_map(|stage| self.default_tasks_for_stage(stage, TaskStatus::Todo))
            .collect()
    }
}

/// Seed provider backed by the compiled-in catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSeed;

impl SeedProvider for BuiltinSeed {
    fn projects(&self) -> Vec<Project> {
        catalog::projects()
    }

    fn tasks(&self) -> TaskMap {
        catalog::tasks()
    }

    fn default_tasks_for_stage(&self, stage: Stage, status: TaskStatus) -> Vec<Task> {
        templates::tasks_for_stage(stage, status)
    }

    fn team_members(&self) -> Vec<TeamMember> {
        catalog::team_members()
    }
}

#[cfg(test)]
mod tests {
    use super::{BuiltinSeed, SeedProvider};
    use crate::model::task::TaskStatus;
    use crate::seed::templates::{full_task_set, template_count};

    #[test]
    fn default_task_set_is_all_todo_template() {
        let set = BuiltinSeed.default_task_set();
        assert_eq!(set.len(), template_count());
        assert_eq!(set, full_task_set(TaskStatus::Todo));
        assert!(set.iter().all(|task| task.attachments.is_empty()));
    }

    #[test]
    fn every_seed_project_has_a_task_list() {
        let tasks = BuiltinSeed.tasks();
        for project in BuiltinSeed.projects() {
            assert!(tasks.contains_key(&project.id), "missing tasks for {}", project.id);
        }
    }
}
