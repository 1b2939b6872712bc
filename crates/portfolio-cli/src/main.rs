//! Portfolio CLI
//!
//! Command-line interface for the local portfolio project store.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use portfolio_core::{seed_on_first_run, Config, ProjectDb, ProjectId, StoreError};

mod commands;
mod output;
mod prompt;

use commands::project::ProjectEdit;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Portfolio - manage a local collection of projects")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database if it does not exist yet
    Init,
    /// List projects
    #[command(alias = "ls")]
    List {
        /// Only projects carrying exactly this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show a project
    Show {
        /// Project id
        id: ProjectId,
    },
    /// Add a project
    Add {
        /// Project title
        title: String,
        /// Project description
        #[arg(short, long)]
        description: Option<String>,
        /// Tags to add (repeatable, or comma-separated)
        #[arg(short, long)]
        tag: Vec<String>,
    },
    /// Change fields of a project
    #[command(alias = "edit")]
    Update {
        /// Project id
        id: ProjectId,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// Tags to add (repeatable, or comma-separated)
        #[arg(short, long)]
        tag: Vec<String>,
        /// Remove existing tags before adding new ones
        #[arg(long)]
        clear_tags: bool,
    },
    /// Delete a project
    #[command(alias = "rm")]
    Delete {
        /// Project id
        id: ProjectId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search titles, descriptions and tags (case-insensitive)
    Search {
        /// Text to look for
        term: String,
    },
    /// Add sample projects to an empty store
    Seed,
    /// Show database location and project count
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, seed_sample_data)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work without opening the store
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, config_path, &output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    init_logging(&config, cli.verbose);

    let db = ProjectDb::new(config.clone());
    db.init().await.context("Failed to open project database")?;

    if config.seed_sample_data {
        seed_on_first_run(&db)
            .await
            .context("Failed to seed sample projects")?;
    }

    let result = run(cli.command, &db, &config, &output).await;
    if let Err(ref e) = result {
        if let Some(hint) = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<StoreError>())
            .and_then(StoreError::recovery_suggestion)
        {
            eprintln!("Hint: {}", hint);
        }
    }
    result
}

async fn run(command: Commands, db: &ProjectDb, config: &Config, output: &Output) -> Result<()> {
    match command {
        Commands::Init => {
            output.success(&format!(
                "Project database ready at {}",
                config.sqlite_path().display()
            ));
            Ok(())
        }
        Commands::List { tag } => commands::project::list(db, tag, output).await,
        Commands::Show { id } => commands::project::show(db, id, output).await,
        Commands::Add {
            title,
            description,
            tag,
        } => commands::project::add(db, title, description, tag, output).await,
        Commands::Update {
            id,
            title,
            description,
            tag,
            clear_tags,
        } => {
            let edit = ProjectEdit {
                title,
                description,
                tags: tag,
                clear_tags,
            };
            commands::project::update(db, id, edit, output).await
        }
        Commands::Delete { id, yes } => commands::project::delete(db, id, yes, output).await,
        Commands::Search { term } => commands::project::search(db, term, output).await,
        Commands::Seed => commands::seed::seed(db, output).await,
        Commands::Status => commands::status::show(db, config, output).await,
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise only warnings, or debug with
/// `--verbose`. Logs are appended to `log_file` when configured, stderr
/// otherwise.
fn init_logging(config: &Config, verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("portfolio_core={},portfolio_cli={}", level, level))
    });

    match &config.log_file {
        Some(path) => {
            let log_file = match open_log_file(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", path, e);
                    return;
                }
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();
            debug!("logging to {:?}", path);
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

/// Open the log file for appending, keeping earlier invocations' lines
fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from([
            "portfolio",
            "update",
            "7",
            "--title",
            "Renamed",
            "-t",
            "a,b",
            "--clear-tags",
        ])
        .unwrap();

        match cli.command {
            Commands::Update {
                id,
                title,
                tag,
                clear_tags,
                ..
            } => {
                assert_eq!(id, 7);
                assert_eq!(title.as_deref(), Some("Renamed"));
                assert_eq!(tag, vec!["a,b"]);
                assert!(clear_tags);
            }
            _ => panic!("expected update command"),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["portfolio", "show", "abc"]).is_err());
    }

    #[test]
    fn test_init_logging_keeps_earlier_log_lines() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("portfolio.log");
        std::fs::write(&path, "earlier run line\n").unwrap();

        let config = Config {
            log_file: Some(path.clone()),
            ..Config::default()
        };
        init_logging(&config, false);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier run line\n"));
    }

    #[test]
    fn test_open_log_file_appends() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("logs.txt");
        std::fs::write(&path, "first\n").unwrap();

        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "second").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_creates_missing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("new.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
