//! Status command

use crate::app::OutputFormat;
use anyhow::Result;
use campusbot_core::{Config, SharedDatabase};

pub fn run(db: &SharedDatabase, config: &Config, format: OutputFormat) -> Result<()> {
    let stats = db.with(|db| db.get_stats())?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Cli => {
            println!("Database:        {}", config.database_path().display());
            println!("Chunks:          {}", stats.chunk_count);
            println!("Source docs:     {}", stats.source_document_count);
            if !stats.chunks_by_source.is_empty() {
                println!();
                println!("Chunks by source:");
                for (table, count) in &stats.chunks_by_source {
                    println!("  {:<14} {}", table, count);
                }
            }
            println!();
            println!("Domain tables:");
            for (table, rows) in &stats.table_rows {
                println!("  {:<14} {}", table, rows);
            }
            if !stats.models.is_empty() {
                println!();
                println!("Embedding models:");
                for (model, dims) in &stats.models {
                    println!("  {} ({} dimensions)", model, dims);
                }
            }
            println!();
            println!(
                "Gemini key:      {}",
                if config.gemini.api_key.is_some() { "set" } else { "missing" }
            );
        }
    }
    Ok(())
}
