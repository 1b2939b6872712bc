//! Seed command handler

use anyhow::{Context, Result};

use portfolio_core::{seed_if_empty, ProjectDb};

use crate::output::Output;

/// Insert the sample projects into an empty store
pub async fn seed(db: &ProjectDb, output: &Output) -> Result<()> {
    let inserted = seed_if_empty(db)
        .await
        .context("Failed to seed sample projects")?;

    if inserted == 0 {
        output.message("Store already has projects; sample data not added.");
    } else {
        output.success(&format!("Added {} sample project(s)", inserted));
    }

    Ok(())
}
