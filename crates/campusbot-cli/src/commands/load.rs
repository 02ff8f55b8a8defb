//! Load command: import JSON rows into a domain table

use crate::app::{LoadArgs, OutputFormat};
use anyhow::{Context, Result};
use campusbot_core::{find_table, CampusBotError, DomainRecord, SharedDatabase};
use serde_json::Value;

pub fn run(args: LoadArgs, db: &SharedDatabase, format: OutputFormat) -> Result<()> {
    let table = find_table(&args.table)
        .ok_or_else(|| CampusBotError::TableNotFound(args.table.clone()))?;

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let records = parse_records(&content)?;

    let ids = db.with(|db| {
        records
            .iter()
            .map(|record| db.insert_record(table, record))
            .collect::<campusbot_core::Result<Vec<i64>>>()
    })?;

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({"table": table.name, "loaded": ids.len(), "ids": ids});
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Cli => {
            println!("Loaded {} rows into {}", ids.len(), table.name);
        }
    }
    Ok(())
}

/// An array of objects, or a single object
fn parse_records(content: &str) -> Result<Vec<DomainRecord>> {
    let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => {
            return Err(CampusBotError::InvalidInput(
                "Expected a JSON array of row objects".to_string(),
            )
            .into())
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            other => Err(CampusBotError::InvalidInput(format!(
                "Expected a row object, got {}",
                other
            ))
            .into()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_shapes() {
        assert_eq!(parse_records(r#"[{"name": "A"}, {"name": "B"}]"#).unwrap().len(), 2);
        assert_eq!(parse_records(r#"{"name": "A"}"#).unwrap().len(), 1);
        assert!(parse_records("[1, 2]").is_err());
        assert!(parse_records("\"text\"").is_err());
    }
}
