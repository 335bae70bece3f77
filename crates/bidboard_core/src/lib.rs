//! Core of the bid board: projects moving through a nine-stage pipeline,
//! per-stage kanban tasks and a per-project discussion thread.
//!
//! Views read from and write through [`ProjectStore`]; everything else in
//! this crate exists to feed it or to derive view state from it.

pub mod board;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod seed;
pub mod service;

pub use board::{derive_board, interpret_drop, Board, DropError, DropEvent, MoveRequest};
pub use bootstrap::{BoxedStore, Session, StorageMode};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::discussion::{BlogComment, BlogPost};
pub use model::project::{NewProject, Project, ProjectId, ProjectStatus, ProjectUpdate};
pub use model::task::{Attachment, NewTask, Stage, Task, TaskId, TaskMap, TaskStatus};
pub use model::team::TeamMember;
pub use notify::{Notification, NotificationLevel, StoreChange, StoreEvent, SubscriptionId};
pub use repo::kv_repo::{KvStore, MemoryKvStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::snapshot::SnapshotError;
pub use seed::{BuiltinSeed, SeedProvider};
pub use service::discussion::{Author, DiscussionError, DiscussionThread};
pub use service::project_store::{MutationOutcome, ProjectStore, StoreSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
