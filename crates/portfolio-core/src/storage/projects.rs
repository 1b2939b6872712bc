//! Requests against the `projects` record store
//!
//! Each function is one store request: a single read, or a single write
//! wrapped in its own transaction so a record and its tag index entries
//! change together. They are synchronous; `ProjectDb` runs them on a
//! blocking worker.

use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use tracing::warn;

use super::error::{StoreError, StoreResult};
use crate::models::{Project, ProjectId};

const PROJECT_SELECT_SQL: &str = "SELECT id, title, description FROM projects";

/// Every project, in key order
pub fn select_all(conn: &Connection) -> StoreResult<Vec<Project>> {
    query_projects(conn, &format!("{PROJECT_SELECT_SQL} ORDER BY id"), [])
}

/// A single project by key
pub fn select_one(conn: &Connection, id: ProjectId) -> StoreResult<Option<Project>> {
    let row = conn
        .query_row(
            &format!("{PROJECT_SELECT_SQL} WHERE id = ?1"),
            [id],
            ProjectRow::from_row,
        )
        .optional()
        .map_err(StoreError::Read)?;

    row.map(|row| hydrate(conn, row)).transpose()
}

/// Projects whose tags contain `tag` exactly, each listed once
pub fn select_by_tag(conn: &Connection, tag: &str) -> StoreResult<Vec<Project>> {
    query_projects(
        conn,
        r#"
        SELECT p.id, p.title, p.description
        FROM projects p
        WHERE EXISTS (
            SELECT 1 FROM project_tags t
            WHERE t.project_id = p.id AND t.tag = ?1
        )
        ORDER BY p.id
        "#,
        [tag],
    )
}

/// Number of stored projects
pub fn count(conn: &Connection) -> StoreResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))
        .map_err(StoreError::Read)
}

/// Insert a new project, returning its key
///
/// The store assigns the key unless the caller supplies one, in which case
/// it must not be taken yet.
pub fn insert(conn: &mut Connection, project: &Project) -> StoreResult<ProjectId> {
    let tx = conn.transaction().map_err(StoreError::Write)?;

    if let Some(id) = project.id {
        if project_exists(&tx, id).map_err(StoreError::Write)? {
            warn!(project_id = id, "rejected add with existing project id");
            return Err(StoreError::DuplicateKey(id));
        }
    }

    tx.execute(
        "INSERT INTO projects (id, title, description) VALUES (?1, ?2, ?3)",
        params![project.id, project.title, project.description],
    )
    .map_err(StoreError::Write)?;
    let id = tx.last_insert_rowid();

    insert_tags(&tx, id, &project.tags).map_err(StoreError::Write)?;
    tx.commit().map_err(StoreError::Write)?;

    Ok(id)
}

/// Replace a project wholesale, creating it if the key is free
pub fn upsert(conn: &mut Connection, project: &Project) -> StoreResult<ProjectId> {
    let id = project.id.ok_or(StoreError::MissingId)?;
    let tx = conn.transaction().map_err(StoreError::Write)?;

    tx.execute(
        r#"
        INSERT INTO projects (id, title, description) VALUES (?1, ?2, ?3)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            description = excluded.description
        "#,
        params![id, project.title, project.description],
    )
    .map_err(StoreError::Write)?;

    tx.execute("DELETE FROM project_tags WHERE project_id = ?1", [id])
        .map_err(StoreError::Write)?;
    insert_tags(&tx, id, &project.tags).map_err(StoreError::Write)?;
    tx.commit().map_err(StoreError::Write)?;

    Ok(id)
}

/// Remove a project; removing an absent key is not an error
pub fn remove(conn: &mut Connection, id: ProjectId) -> StoreResult<()> {
    let tx = conn.transaction().map_err(StoreError::Write)?;
    tx.execute("DELETE FROM project_tags WHERE project_id = ?1", [id])
        .map_err(StoreError::Write)?;
    tx.execute("DELETE FROM projects WHERE id = ?1", [id])
        .map_err(StoreError::Write)?;
    tx.commit().map_err(StoreError::Write)
}

// ==================== Private helpers ====================

struct ProjectRow {
    id: ProjectId,
    title: String,
    description: String,
}

impl ProjectRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
        })
    }
}

fn query_projects<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> StoreResult<Vec<Project>> {
    let mut stmt = conn.prepare(sql).map_err(StoreError::Read)?;
    let rows = stmt
        .query_map(params, ProjectRow::from_row)
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(StoreError::Read)?;

    rows.into_iter().map(|row| hydrate(conn, row)).collect()
}

/// Attach the ordered tags to a project row
fn hydrate(conn: &Connection, row: ProjectRow) -> StoreResult<Project> {
    let tags = tags_for(conn, row.id).map_err(StoreError::Read)?;

    Ok(Project {
        id: Some(row.id),
        title: row.title,
        description: row.description,
        tags,
    })
}

fn tags_for(conn: &Connection, id: ProjectId) -> rusqlite::Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT tag FROM project_tags WHERE project_id = ?1 ORDER BY position")?;
    let tags = stmt
        .query_map([id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(tags)
}

fn insert_tags(tx: &Transaction, id: ProjectId, tags: &[String]) -> rusqlite::Result<()> {
    let mut stmt =
        tx.prepare("INSERT INTO project_tags (project_id, position, tag) VALUES (?1, ?2, ?3)")?;
    for (position, tag) in tags.iter().enumerate() {
        stmt.execute(params![id, position as i64, tag])?;
    }
    Ok(())
}

fn project_exists(tx: &Transaction, id: ProjectId) -> rusqlite::Result<bool> {
    tx.prepare("SELECT 1 FROM projects WHERE id = ?1")?
        .exists([id])
}
