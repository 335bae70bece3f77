//! Session bootstrap: config, then logging, then storage, then store.
//!
//! Opening never fails. When the configured database cannot be opened the
//! session degrades to in-memory storage and runs on seed data.

use crate::config::CoreConfig;
use crate::logging::{init_logging, LoggingError};
use crate::repo::kv_repo::{KvStore, MemoryKvStore, SqliteKvStore};
use crate::seed::BuiltinSeed;
use crate::service::discussion::{Author, DiscussionThread};
use crate::service::project_store::{MutationOutcome, ProjectStore};
use chrono::Utc;
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub type BoxedStore = ProjectStore<Box<dyn KvStore>, BuiltinSeed>;

/// Where the session's snapshots actually live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    File(PathBuf),
    InMemorySqlite,
    Memory,
}

impl StorageMode {
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

/// One running session: the store plus per-project discussion threads.
pub struct Session {
    pub store: BoxedStore,
    pub storage: StorageMode,
    /// Set when file logging was requested but could not start.
    pub logging_error: Option<LoggingError>,
    config: CoreConfig,
    threads: BTreeMap<String, DiscussionThread>,
}

impl Session {
    pub fn open(config: CoreConfig) -> Self {
        let logging_error = match &config.log_dir {
            Some(dir) => init_logging(&config.log_level, dir).err(),
            None => None,
        };
        let (kv, storage) = open_storage(&config);
        info!(
            "event=session_open module=bootstrap status=ok storage={:?} {}",
            storage,
            config.summary()
        );
        Self {
            store: ProjectStore::open(kv, BuiltinSeed),
            storage,
            logging_error,
            config,
            threads: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Author record for the configured user, with their roster avatar if known.
    pub fn author(&self) -> Author {
        let user = &self.config.current_user;
        let member = self
            .store
            .team_members()
            .iter()
            .find(|member| &member.id == user || &member.name == user);
        match member {
            Some(member) => Author {
                name: member.name.clone(),
                avatar: Some(member.avatar.clone()),
            },
            None => Author::new(user.clone()),
        }
    }

    /// Deletes a project and its discussion thread.
    pub fn delete_project(&mut self, project_id: &str) -> MutationOutcome {
        let outcome = self.store.delete_project(project_id);
        self.threads.remove(project_id);
        outcome
    }

    /// Number of discussion threads opened this session.
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Discussion thread of an existing project, seeded on first access.
    ///
    /// A thread left behind by a project deleted through `store` directly is
    /// dropped here.
    pub fn thread_mut(&mut self, project_id: &str) -> Option<&mut DiscussionThread> {
        if self.store.get_project_by_id(project_id).is_none() {
            self.threads.remove(project_id);
            return None;
        }
        Some(
            self.threads
                .entry(project_id.to_string())
                .or_insert_with(|| DiscussionThread::seeded(project_id, Utc::now())),
        )
    }
}

fn open_storage(config: &CoreConfig) -> (Box<dyn KvStore>, StorageMode) {
    if let Some(path) = &config.db_path {
        match SqliteKvStore::open(path) {
            Ok(kv) => return (Box::new(kv), StorageMode::File(path.clone())),
            Err(err) => error!(
                "event=storage_open module=bootstrap status=error path={} error={}",
                path.display(),
                err
            ),
        }
    }
    match SqliteKvStore::open_in_memory() {
        Ok(kv) => (Box::new(kv), StorageMode::InMemorySqlite),
        Err(err) => {
            warn!("event=storage_open module=bootstrap status=fallback mode=memory error={err}");
            (Box::new(MemoryKvStore::new()), StorageMode::Memory)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_db_path_runs_in_memory_on_seed() {
        let session = Session::open(CoreConfig::default());
        assert_eq!(session.storage, StorageMode::InMemorySqlite);
        assert!(!session.storage.is_durable());
        assert!(session.logging_error.is_none());
        assert_eq!(session.store.projects().len(), 5);
    }

    #[test]
    fn unopenable_db_path_degrades_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig {
            db_path: Some(dir.path().join("missing").join("board.db")),
            ..CoreConfig::default()
        };
        let session = Session::open(config);
        assert_eq!(session.storage, StorageMode::InMemorySqlite);
    }

    #[test]
    fn threads_exist_only_for_known_projects() {
        let mut session = Session::open(CoreConfig::default());
        assert!(session.thread_mut("404").is_none());
        let thread = session.thread_mut("2").unwrap();
        assert_eq!(thread.project_id(), "2");
        assert_eq!(thread.posts().len(), 2);
    }

    #[test]
    fn deleted_projects_lose_their_thread() {
        let mut session = Session::open(CoreConfig::default());
        session.thread_mut("2").unwrap();
        session.thread_mut("3").unwrap();
        assert_eq!(session.thread_count(), 2);

        assert_eq!(session.delete_project("2"), MutationOutcome::Applied);
        assert_eq!(session.thread_count(), 1);

        session.store.delete_project("3");
        assert!(session.thread_mut("3").is_none());
        assert_eq!(session.thread_count(), 0);
    }

    #[test]
    fn author_resolves_roster_member() {
        let config = CoreConfig {
            current_user: "3".to_string(),
            ..CoreConfig::default()
        };
        let session = Session::open(config);
        assert_eq!(session.author().name, "Maria Bergström");
        let stranger = Session::open(CoreConfig {
            current_user: "user9".to_string(),
            ..CoreConfig::default()
        });
        assert_eq!(stranger.author(), Author::new("user9"));
    }
}
