//! Sample data
//!
//! Optional collaborator that fills an empty store with a few example
//! projects. The store never seeds itself; callers opt in. The CLI uses
//! `seed_if_empty` for `portfolio seed` and `seed_on_first_run` when
//! `seed_sample_data` is set, so emptying the store later does not bring the
//! samples back.

use tracing::info;

use crate::models::Project;
use crate::storage::StoreResult;
use crate::store::ProjectDb;

/// The example projects inserted by `seed_if_empty`
pub fn sample_projects() -> Vec<Project> {
    vec![
        Project::new("E-Commerce Platform")
            .with_description(
                "Full-stack online store with product catalog, cart and checkout flow.",
            )
            .with_tags(["web", "fullstack", "payments"]),
        Project::new("Weather Dashboard")
            .with_description("Forecast viewer pulling data from a public weather API.")
            .with_tags(["web", "api", "charts"]),
        Project::new("Task Manager CLI")
            .with_description("Terminal to-do list with tags, due dates and local storage.")
            .with_tags(["cli", "productivity"]),
        Project::new("Portfolio Website")
            .with_description("Personal site showcasing projects, searchable by tag.")
            .with_tags(["web", "design"]),
    ]
}

/// Insert the sample projects if the store holds no projects yet
///
/// Returns how many projects were inserted (zero when the store already had
/// data).
pub async fn seed_if_empty(db: &ProjectDb) -> StoreResult<usize> {
    if db.count().await? > 0 {
        return Ok(0);
    }

    let samples = sample_projects();
    for project in &samples {
        db.add(project).await?;
    }

    db.mark_samples_seeded().await?;

    info!(count = samples.len(), "seeded sample projects");
    Ok(samples.len())
}

/// Insert the sample projects only if this database was never seeded and is
/// still empty
///
/// The decision is recorded either way, so later calls insert nothing.
pub async fn seed_on_first_run(db: &ProjectDb) -> StoreResult<usize> {
    if db.samples_seeded().await? {
        return Ok(0);
    }

    let inserted = seed_if_empty(db).await?;
    if inserted == 0 {
        db.mark_samples_seeded().await?;
    }
    Ok(inserted)
}
