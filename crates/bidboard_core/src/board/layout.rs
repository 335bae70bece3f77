//! Stage x status grouping of task lists.

use crate::model::task::{Stage, Task, TaskStatus};

/// One kanban column inside a stage row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColumn<'a> {
    pub status: TaskStatus,
    /// Tasks in their task-list order.
    pub tasks: Vec<&'a Task>,
}

/// One pipeline stage with its four status columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRow<'a> {
    pub stage: Stage,
    pub columns: Vec<StatusColumn<'a>>,
}

/// Completed vs. total task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Whole-number completion percentage; `0` for an empty set.
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        // done <= total, so the quotient is at most 100.
        ((self.done * 100) / self.total) as u8
    }
}

impl<'a> StageRow<'a> {
    fn empty(stage: Stage) -> Self {
        Self {
            stage,
            columns: TaskStatus::ALL
                .into_iter()
                .map(|status| StatusColumn {
                    status,
                    tasks: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn column(&self, status: TaskStatus) -> &StatusColumn<'a> {
        &self.columns[status.position()]
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            done: self.column(TaskStatus::Done).tasks.len(),
            total: self.task_count(),
        }
    }
}

/// Fully grouped board for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<'a> {
    pub rows: Vec<StageRow<'a>>,
}

impl<'a> Board<'a> {
    pub fn row(&self, stage: Stage) -> &StageRow<'a> {
        &self.rows[stage.position()]
    }

    pub fn cell(&self, stage: Stage, status: TaskStatus) -> &[&'a Task] {
        &self.row(stage).column(status).tasks
    }

    /// Cell currently holding `task_id`, if any.
    pub fn locate(&self, task_id: &str) -> Option<(Stage, TaskStatus)> {
        self.rows.iter().find_map(|row| {
            row.columns.iter().find_map(|column| {
                column
                    .tasks
                    .iter()
                    .any(|task| task.id == task_id)
                    .then_some((row.stage, column.status))
            })
        })
    }

    /// Task count per status, in column order.
    pub fn status_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for row in &self.rows {
            for column in &row.columns {
                counts[column.status.position()] += column.tasks.len();
            }
        }
        counts
    }

    pub fn progress(&self) -> Progress {
        let counts = self.status_counts();
        Progress {
            done: counts[TaskStatus::Done.position()],
            total: counts.iter().sum(),
        }
    }
}

/// Groups `tasks` by `(stage, status)` in the fixed row/column order.
pub fn derive_board(tasks: &[Task]) -> Board<'_> {
    let mut rows: Vec<StageRow<'_>> = Stage::ALL.into_iter().map(StageRow::empty).collect();
    for task in tasks {
        rows[task.stage.position()].columns[task.status.position()]
            .tasks
            .push(task);
    }
    Board { rows }
}
