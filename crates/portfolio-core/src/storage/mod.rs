//! Storage layer
//!
//! The local database behind the project store: a single SQLite file holding
//! the `projects` record store and its two lookup indexes.

pub mod error;
pub mod projects;
pub mod schema;

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;
use tracing::info;

pub use error::{StoreError, StoreResult};
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};

/// Open (creating if absent) the database file at `path`
///
/// Creates the parent directory and, on first creation, the schema.
pub fn open_connection(path: &Path) -> StoreResult<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| StoreError::from_io(e, parent.to_path_buf()))?;
    }

    let conn = Connection::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    prepare(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
        path: ":memory:".into(),
        source,
    })?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(StoreError::Schema)?;

    if needs_init(conn) {
        init_schema(conn).map_err(StoreError::Schema)?;
        info!(version = SCHEMA_VERSION, "created projects store");
    }

    Ok(())
}
