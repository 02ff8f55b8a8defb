//! Populate command

use super::gemini_client;
use anyhow::Result;
use campusbot_core::{populate_embeddings, Config, SharedDatabase};

pub async fn run(db: &SharedDatabase, config: &Config) -> Result<()> {
    let client = gemini_client(config)?;

    println!("Embedding domain table rows...");
    let report = populate_embeddings(db, client.as_ref()).await?;

    println!("Population complete:");
    println!("  Inserted: {}", report.inserted);
    println!("  Skipped:  {}", report.skipped);
    println!("  Failed:   {}", report.failed);
    Ok(())
}
