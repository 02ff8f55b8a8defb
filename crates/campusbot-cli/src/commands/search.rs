//! Search command: nearest-neighbour search over stored chunks

use super::{gemini_client, preview};
use crate::app::{OutputFormat, SearchArgs};
use anyhow::Result;
use campusbot_core::search::retrieve_by_embedding;
use campusbot_core::{Config, SharedDatabase};

pub async fn run(
    args: SearchArgs,
    db: &SharedDatabase,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let query = args.query.join(" ");
    let client = gemini_client(config)?;

    let mut retrieval = config.retrieval.clone();
    if let Some(limit) = args.limit {
        retrieval.top_k = limit;
    }

    let hits = retrieve_by_embedding(db, client.as_ref(), &query, &retrieval).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        OutputFormat::Cli => {
            if hits.is_empty() {
                println!("No stored chunks found");
            }
            for hit in &hits {
                println!(
                    "{:.4}  {}/{}  {}",
                    hit.distance,
                    hit.chunk.source_table,
                    hit.chunk.source_id,
                    preview(&hit.chunk.content, 80)
                );
            }
        }
    }
    Ok(())
}
