//! Ingest commands

use super::gemini_client;
use crate::app::{IngestArgs, IngestTextArgs};
use anyhow::{Context, Result};
use campusbot_core::{ingest_directory, ingest_text, Config, IngestReport, SharedDatabase};

pub async fn run_directory(args: IngestArgs, db: &SharedDatabase, config: &Config) -> Result<()> {
    if !args.dir.is_dir() {
        anyhow::bail!("Not a directory: {}", args.dir.display());
    }
    let client = gemini_client(config)?;

    println!("Ingesting text files from {}...", args.dir.display());
    let report = ingest_directory(db, client.as_ref(), &args.dir, &config.chunking).await?;
    print_report(&report);
    Ok(())
}

pub async fn run_text(args: IngestTextArgs, db: &SharedDatabase, config: &Config) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let filename = match args.filename {
        Some(name) => name,
        None => args
            .file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .context("File path has no file name")?,
    };
    let storage_path = args
        .storage_path
        .unwrap_or_else(|| format!("uploads/{}", filename));

    let client = gemini_client(config)?;
    let report = ingest_text(
        db,
        client.as_ref(),
        &filename,
        &storage_path,
        &text,
        &config.chunking,
    )
    .await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &IngestReport) {
    println!("Ingestion complete:");
    println!("  Documents: {}", report.documents);
    println!("  Chunks:    {}", report.chunks_inserted);
    if report.errors > 0 {
        println!("  Errors:    {}", report.errors);
    }
}
