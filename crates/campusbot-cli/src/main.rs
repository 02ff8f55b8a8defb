//! Campusbot CLI
//!
//! University information assistant: ingestion, retrieval and chat.

use anyhow::{Context, Result};
use campusbot_core::error::exit_codes;
use campusbot_core::{CampusBotError, Config, Database, SharedDatabase};
use clap::Parser;

mod app;
mod commands;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<CampusBotError>()
            .map(CampusBotError::exit_code)
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let db = || open_database(&config);
    let format = cli.format;

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, config.clone()).await,
        Commands::Ingest(args) => commands::ingest::run_directory(args, &db()?, &config).await,
        Commands::IngestText(args) => commands::ingest::run_text(args, &db()?, &config).await,
        Commands::Populate => commands::populate::run(&db()?, &config).await,
        Commands::Load(args) => commands::load::run(args, &db()?, format),
        Commands::Route(args) => commands::route::run(args, &db()?, &config, format),
        Commands::Search(args) => commands::search::run(args, &db()?, &config, format).await,
        Commands::Chat(args) => {
            commands::chat::run(args, &db()?, &config, format, cli.verbose).await
        }
        Commands::Status => commands::status::run(&db()?, &config, format),
    }
}

fn open_database(config: &Config) -> Result<SharedDatabase> {
    let db_path = config.database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let db = Database::open(&db_path)?;
    db.initialize()?;
    Ok(SharedDatabase::new(db))
}
