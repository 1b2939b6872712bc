//! Portfolio Core Library
//!
//! Create/read/update/delete and simple text search over a single local
//! collection of portfolio projects.
//!
//! # Architecture
//!
//! - **SQLite**: one local database file holding the `projects` record store
//!   with a `title` index and a multi-entry `tags` index
//! - **ProjectDb**: async accessor, one method per store request
//!
//! # Quick Start
//!
//! ```text
//! let db = ProjectDb::new(Config::load()?);
//! db.init().await?;
//!
//! let id = db.add(&Project::new("Weather app").with_tags(["web"])).await?;
//! let hits = db.search("weather").await?;
//! ```
//!
//! # Modules
//!
//! - `store`: Async store accessor (main entry point)
//! - `models`: The `Project` record
//! - `storage`: Schema, requests and errors for the SQLite database
//! - `seed`: Optional sample data
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::{Project, ProjectId};
pub use seed::{sample_projects, seed_if_empty, seed_on_first_run};
pub use storage::{StoreError, StoreResult};
pub use store::ProjectDb;
