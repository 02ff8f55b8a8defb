//! Route command: keyword routing without calling any model

use crate::app::{OutputFormat, QueryArgs};
use anyhow::Result;
use campusbot_core::search::{first_token, retrieve_by_keywords};
use campusbot_core::{select_tables, Config, SharedDatabase};

pub fn run(args: QueryArgs, db: &SharedDatabase, config: &Config, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    let tables = select_tables(&query);
    let token = first_token(&query);
    let limit = config.retrieval.keyword_row_limit;
    let matches = db.with(|db| Ok(retrieve_by_keywords(db, &query, limit)))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "query": query,
                "token": token,
                "tables": tables,
                "matches": matches,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Cli => {
            println!(
                "Tables: {}",
                tables.iter().copied().collect::<Vec<_>>().join(", ")
            );
            println!("Token:  {}", token.unwrap_or("-"));
            if matches.is_empty() {
                println!("No matching rows");
            }
            for table in &matches {
                println!();
                println!("{} ({} rows)", table.table, table.rows.len());
                for row in &table.rows {
                    println!("  {}", serde_json::to_string(row)?);
                }
            }
        }
    }
    Ok(())
}
