//! Keyword-mode retrieval over domain tables

use super::router::{first_token, select_tables};
use super::{TableMatches, TableSource};
use crate::tables::find_table;

/// Look up the first query token in every routed table.
///
/// A table that fails to answer is logged and skipped; tables with no
/// matching rows are left out of the result.
pub fn retrieve_by_keywords(
    source: &dyn TableSource,
    query: &str,
    limit: usize,
) -> Vec<TableMatches> {
    let Some(token) = first_token(query) else {
        tracing::debug!("No usable token in query, skipping table lookups");
        return Vec::new();
    };

    let mut matches = Vec::new();
    for name in select_tables(query) {
        let Some(table) = find_table(name) else {
            continue;
        };

        match source.lookup(table, token, limit) {
            Ok(rows) if rows.is_empty() => {}
            Ok(rows) => {
                tracing::debug!("{} rows from {} for '{}'", rows.len(), name, token);
                matches.push(TableMatches {
                    table: name.to_string(),
                    rows,
                });
            }
            Err(e) => {
                tracing::warn!("Lookup in {} failed: {}", name, e);
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DomainRecord};
    use crate::error::{CampusBotError, Result};
    use crate::tables::TableSpec;
    use serde_json::json;

    fn record(pairs: &[(&str, &str)]) -> DomainRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let hostels = find_table("hostels").unwrap();
        db.insert_record(hostels, &record(&[("name", "Hostels Block A"), ("fee", "90000")]))
            .unwrap();
        db.insert_record(hostels, &record(&[("name", "Hostels Block B"), ("fee", "95000")]))
            .unwrap();
        db.insert_record(hostels, &record(&[("name", "Aryabhatta"), ("fee", "80000")]))
            .unwrap();
        db
    }

    #[test]
    fn test_hostel_query_returns_matching_rows() {
        let db = seeded_db();
        let matches = retrieve_by_keywords(&db, "Hostels with AC?", 3);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].table, "hostels");
        assert_eq!(matches[0].rows.len(), 2);
        assert_eq!(matches[0].rows[0]["name"], json!("Hostels Block A"));
    }

    #[test]
    fn test_row_limit_is_respected() {
        let db = seeded_db();
        let matches = retrieve_by_keywords(&db, "hostels", 1);
        assert_eq!(matches[0].rows.len(), 1);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let db = seeded_db();
        assert!(retrieve_by_keywords(&db, "  ?! ", 3).is_empty());
    }

    struct FlakySource;

    impl TableSource for FlakySource {
        fn lookup(&self, table: &TableSpec, _token: &str, _limit: usize) -> Result<Vec<DomainRecord>> {
            if table.name == "contacts" {
                return Err(CampusBotError::TableNotFound(table.name.to_string()));
            }
            Ok(vec![record(&[("question", "Where is the library?")])])
        }
    }

    #[test]
    fn test_failing_table_is_skipped() {
        let matches = retrieve_by_keywords(&FlakySource, "dean office timings", 3);
        let tables: Vec<&str> = matches.iter().map(|m| m.table.as_str()).collect();
        assert!(tables.contains(&"transport"));
        assert!(!tables.contains(&"contacts"));
    }
}
