//! Project store accessor
//!
//! `ProjectDb` owns the handle to the local database and exposes one async
//! method per store request. The handle is opened lazily: every method
//! initializes it on first use, so calling `init` up front is optional.
//!
//! ## Usage
//!
//! ```ignore
//! let db = ProjectDb::new(Config::load()?);
//! db.init().await?;
//!
//! let id = db.add(&Project::new("Weather app").with_tags(["web"])).await?;
//! let web = db.get_by_tag("web").await?;
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::{Mutex, OnceCell};
use tokio::task;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{Project, ProjectId};
use crate::storage::{self, projects, schema, StoreError, StoreResult};

type Handle = Arc<Mutex<Connection>>;

/// Where the database lives
#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Async access to the `projects` record store
pub struct ProjectDb {
    location: Location,
    handle: OnceCell<Handle>,
}

impl ProjectDb {
    /// Create an accessor for the database described by `config`
    ///
    /// Nothing is opened until `init` or the first request.
    pub fn new(config: Config) -> Self {
        Self::at_path(config.sqlite_path())
    }

    /// Create an accessor for a specific database file
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            handle: OnceCell::new(),
        }
    }

    /// Create an accessor backed by a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            handle: OnceCell::new(),
        }
    }

    /// Open the database, creating the store and its indexes if absent
    ///
    /// Idempotent: later calls reuse the open handle.
    pub async fn init(&self) -> StoreResult<()> {
        self.handle().await.map(|_| ())
    }

    /// Whether the handle has been opened
    pub fn is_initialized(&self) -> bool {
        self.handle.initialized()
    }

    /// Every stored project, in key order
    pub async fn get_all(&self) -> StoreResult<Vec<Project>> {
        let all = self.run(|conn| projects::select_all(conn)).await?;
        debug!(count = all.len(), "loaded all projects");
        Ok(all)
    }

    /// A single project by key
    pub async fn get(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        self.run(move |conn| projects::select_one(conn, id)).await
    }

    /// Insert a new project and return the key the store assigned
    pub async fn add(&self, project: &Project) -> StoreResult<ProjectId> {
        let project = project.clone();
        let id = self
            .run(move |conn| projects::insert(conn, &project))
            .await?;
        debug!(project_id = id, "added project");
        Ok(id)
    }

    /// Replace a project wholesale (creating it if its key is free)
    pub async fn update(&self, project: &Project) -> StoreResult<ProjectId> {
        let project = project.clone();
        let id = self
            .run(move |conn| projects::upsert(conn, &project))
            .await?;
        debug!(project_id = id, "updated project");
        Ok(id)
    }

    /// Remove a project; absent keys are ignored
    pub async fn delete(&self, id: ProjectId) -> StoreResult<()> {
        self.run(move |conn| projects::remove(conn, id)).await?;
        debug!(project_id = id, "deleted project");
        Ok(())
    }

    /// Projects whose title, description or any tag contains `term`,
    /// ignoring case
    ///
    /// Loads every project and filters in memory.
    pub async fn search(&self, term: &str) -> StoreResult<Vec<Project>> {
        let all = self.get_all().await?;
        let matches: Vec<Project> = all.into_iter().filter(|p| p.matches(term)).collect();
        debug!(term = %term, count = matches.len(), "searched projects");
        Ok(matches)
    }

    /// Projects tagged exactly `tag`, via the tag index
    pub async fn get_by_tag(&self, tag: &str) -> StoreResult<Vec<Project>> {
        let tag = tag.to_string();
        self.run(move |conn| projects::select_by_tag(conn, &tag))
            .await
    }

    /// Number of stored projects
    pub async fn count(&self) -> StoreResult<i64> {
        self.run(|conn| projects::count(conn)).await
    }

    /// Whether sample projects were ever seeded into this database
    pub async fn samples_seeded(&self) -> StoreResult<bool> {
        self.run(|conn| schema::samples_seeded(conn).map_err(StoreError::Read))
            .await
    }

    /// Record that sample projects were seeded
    pub async fn mark_samples_seeded(&self) -> StoreResult<()> {
        self.run(|conn| schema::mark_samples_seeded(conn).map_err(StoreError::Write))
            .await
    }

    // ==================== Private helpers ====================

    async fn handle(&self) -> StoreResult<&Handle> {
        self.handle
            .get_or_try_init(|| async {
                let location = self.location.clone();
                let conn = task::spawn_blocking(move || match location {
                    Location::File(path) => storage::open_connection(&path),
                    Location::Memory => storage::open_in_memory(),
                })
                .await??;
                info!(location = ?self.location, "opened project database");
                Ok::<_, StoreError>(Arc::new(Mutex::new(conn)))
            })
            .await
    }

    /// Run one request against the connection on the blocking pool
    async fn run<T, F>(&self, request: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let handle = Arc::clone(self.handle().await?);
        let mut conn = handle.lock_owned().await;
        task::spawn_blocking(move || request(&mut *conn)).await?
    }
}
