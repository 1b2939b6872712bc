//! Status command handler

use anyhow::Result;

use portfolio_core::{Config, ProjectDb};

use crate::output::{Output, OutputFormat};

/// Show where the store lives and how much it holds
pub async fn show(db: &ProjectDb, config: &Config, output: &Output) -> Result<()> {
    let count = db.count().await?;
    let path = config.sqlite_path();

    match output.format {
        OutputFormat::Json => {
            output.json(&serde_json::json!({
                "database": path,
                "projects": count,
                "seed_sample_data": config.seed_sample_data
            }));
        }
        OutputFormat::Quiet => {
            println!("{}", count);
        }
        OutputFormat::Human => {
            println!("Portfolio Status");
            println!("================");
            println!();
            println!("Database: {}", path.display());
            println!("Projects: {}", count);
        }
    }

    Ok(())
}
