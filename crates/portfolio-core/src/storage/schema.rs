//! SQLite schema for the `projects` record store
//!
//! One record table plus the two lookup indexes:
//! - `idx_projects_title`: non-unique index on the title
//! - `project_tags` + `idx_project_tags_tag`: multi-entry tag index, one row
//!   per tag of the owning project

use rusqlite::{Connection, Result};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// `schema_info` key set once the sample projects have been inserted
const SAMPLES_SEEDED_KEY: &str = "samples_seeded";

/// Initialize the database schema
///
/// Every statement is create-if-absent, so running it against an existing
/// database leaves stored projects untouched.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_info (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- Project records, keyed by an auto-assigned id
        CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );

        -- Tag entries, position keeps the caller's tag order
        CREATE TABLE IF NOT EXISTS project_tags (
            project_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            tag TEXT NOT NULL,
            PRIMARY KEY (project_id, position),
            FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_projects_title ON projects(title);
        CREATE INDEX IF NOT EXISTS idx_project_tags_tag ON project_tags(tag);
        "#,
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<Option<i32>> {
    let mut stmt = conn.prepare("SELECT value FROM schema_info WHERE key = 'version'")?;
    let result: Result<String> = stmt.query_row([], |row| row.get(0));

    match result {
        Ok(version_str) => Ok(version_str.parse().ok()),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Whether the sample projects were inserted into this database before
pub fn samples_seeded(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM schema_info WHERE key = ?")?;
    stmt.exists([SAMPLES_SEEDED_KEY])
}

/// Remember that the sample projects were inserted
pub fn mark_samples_seeded(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_info (key, value) VALUES (?, '1')",
        [SAMPLES_SEEDED_KEY],
    )?;
    Ok(())
}

/// Check if the schema still has to be created
pub fn needs_init(conn: &Connection) -> bool {
    let table_exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_info'")
        .and_then(|mut stmt| stmt.exists([]))
        .unwrap_or(false);

    if !table_exists {
        return true;
    }

    match get_schema_version(conn) {
        Ok(Some(v)) => v < SCHEMA_VERSION,
        _ => true,
    }
}
