//! Project command handlers

use anyhow::{Context, Result};
use tracing::{debug, info};

use portfolio_core::{Project, ProjectDb, ProjectId};

use crate::output::Output;
use crate::prompt::confirm;

/// Field changes requested by `portfolio update`
#[derive(Debug, Default)]
pub struct ProjectEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub clear_tags: bool,
}

impl ProjectEdit {
    /// Apply the requested changes; new tags are appended after existing ones
    /// unless `clear_tags` is set
    pub fn apply(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.set_title(title);
        }
        if let Some(description) = self.description {
            project.set_description(description);
        }
        if self.clear_tags {
            project.set_tags(Vec::new());
        }
        for tag in split_tags(self.tags) {
            project.add_tag(tag);
        }
    }
}

/// Add a new project
pub async fn add(
    db: &ProjectDb,
    title: String,
    description: Option<String>,
    tags: Vec<String>,
    output: &Output,
) -> Result<()> {
    let mut project = Project::new(title)
        .with_description(description.unwrap_or_default())
        .with_tags(split_tags(tags));

    let id = db.add(&project).await.context("Failed to add project")?;
    project.id = Some(id);
    info!(project_id = id, "added project via cli");

    output.success(&format!("Added project: {}", id));
    output.print_project(&project);

    Ok(())
}

/// List all projects, optionally filtered by exact tag
pub async fn list(db: &ProjectDb, tag: Option<String>, output: &Output) -> Result<()> {
    let projects = match tag {
        Some(ref t) => db
            .get_by_tag(t)
            .await
            .with_context(|| format!("Failed to list projects tagged '{}'", t))?,
        None => db.get_all().await.context("Failed to list projects")?,
    };

    output.print_projects(&projects);
    Ok(())
}

/// Show a single project
pub async fn show(db: &ProjectDb, id: ProjectId, output: &Output) -> Result<()> {
    let project = db
        .get(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Project not found: {}", id))?;

    output.print_project(&project);
    Ok(())
}

/// Edit fields of an existing project and store it wholesale
pub async fn update(
    db: &ProjectDb,
    id: ProjectId,
    edit: ProjectEdit,
    output: &Output,
) -> Result<()> {
    let mut project = db
        .get(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Project not found: {}", id))?;

    edit.apply(&mut project);
    db.update(&project)
        .await
        .context("Failed to update project")?;
    info!(project_id = id, "updated project via cli");

    output.success("Project updated");
    output.print_project(&project);

    Ok(())
}

/// Delete a project
///
/// Deleting an id that does not exist is not an error.
pub async fn delete(db: &ProjectDb, id: ProjectId, yes: bool, output: &Output) -> Result<()> {
    let Some(project) = db.get(id).await? else {
        debug!(project_id = id, "delete of absent project ignored");
        output.message(&format!("No project with id {}; nothing to delete.", id));
        return Ok(());
    };

    if !yes && output.should_prompt() {
        println!("Delete project: {} - {}", id, project.title);
        if !confirm("Are you sure?")? {
            debug!(project_id = id, "delete cancelled");
            println!("Cancelled.");
            return Ok(());
        }
    }

    db.delete(id).await.context("Failed to delete project")?;
    info!(project_id = id, "deleted project via cli");

    output.success(&format!("Deleted project: {}", id));

    Ok(())
}

/// Case-insensitive search over titles, descriptions and tags
pub async fn search(db: &ProjectDb, term: String, output: &Output) -> Result<()> {
    let projects = db
        .search(&term)
        .await
        .context("Failed to search projects")?;
    output.print_projects(&projects);
    Ok(())
}

/// Split comma-separated tag arguments, dropping blanks
fn split_tags(raw: Vec<String>) -> Vec<String> {
    raw.iter()
        .flat_map(|arg| arg.split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_split_tags() {
        let tags = split_tags(vec![
            "rust, cli".to_string(),
            " web ".to_string(),
            ",,".to_string(),
        ]);
        assert_eq!(tags, vec!["rust", "cli", "web"]);
    }

    #[test]
    fn test_edit_appends_tags() {
        let mut project = Project::new("Old").with_tags(["a"]);
        ProjectEdit {
            title: Some("New".to_string()),
            tags: vec!["b,a".to_string()],
            ..ProjectEdit::default()
        }
        .apply(&mut project);

        assert_eq!(project.title, "New");
        assert_eq!(project.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_edit_clears_tags() {
        let mut project = Project::new("P")
            .with_description("keep")
            .with_tags(["a", "b"]);
        ProjectEdit {
            tags: vec!["c".to_string()],
            clear_tags: true,
            ..ProjectEdit::default()
        }
        .apply(&mut project);

        assert_eq!(project.description, "keep");
        assert_eq!(project.tags, vec!["c"]);
    }

    #[tokio::test]
    async fn test_add_update_delete_flow() {
        let db = ProjectDb::in_memory();
        let output = quiet();

        add(
            &db,
            "Site".to_string(),
            Some("Static".to_string()),
            vec!["web".to_string()],
            &output,
        )
        .await
        .unwrap();
        let id = db.get_all().await.unwrap()[0].id.unwrap();

        let edit = ProjectEdit {
            description: Some("Dynamic".to_string()),
            ..ProjectEdit::default()
        };
        update(&db, id, edit, &output).await.unwrap();
        assert_eq!(db.get(id).await.unwrap().unwrap().description, "Dynamic");

        delete(&db, id, true, &output).await.unwrap();
        delete(&db, id, true, &output).await.unwrap();
        assert_eq!(db.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_project_fails() {
        let db = ProjectDb::in_memory();
        let err = update(&db, 1, ProjectEdit::default(), &quiet())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Project not found"));
    }

    #[tokio::test]
    async fn test_read_handlers_quiet_output() {
        let db = ProjectDb::in_memory();
        let output = quiet();
        portfolio_core::seed_if_empty(&db).await.unwrap();
        let id = db.get_all().await.unwrap()[0].id.unwrap();

        list(&db, None, &output).await.unwrap();
        list(&db, Some("web".to_string()), &output).await.unwrap();
        list(&db, Some("no-such-tag".to_string()), &output)
            .await
            .unwrap();
        show(&db, id, &output).await.unwrap();
        search(&db, "WEATHER".to_string(), &output).await.unwrap();
        search(&db, String::new(), &output).await.unwrap();
    }

    #[tokio::test]
    async fn test_show_missing_project_fails() {
        let db = ProjectDb::in_memory();
        let err = show(&db, 99, &quiet()).await.unwrap_err();
        assert!(err.to_string().contains("Project not found: 99"));
    }
}
