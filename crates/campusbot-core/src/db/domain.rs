//! Structured domain tables (hostels, courses, contacts, ...)

use super::Database;
use crate::error::{CampusBotError, Result};
use crate::tables::TableSpec;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params, Row};
use serde_json::{Map, Value};

/// A domain row as column name → JSON value, `id` included
pub type DomainRecord = Map<String, Value>;

impl Database {
    /// Rows whose search column contains `token` (case-insensitive), at most `limit`
    pub fn lookup_rows(
        &self,
        table: &TableSpec,
        token: &str,
        limit: usize,
    ) -> Result<Vec<DomainRecord>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} LIKE ?1 ESCAPE '\\' ORDER BY id LIMIT ?2",
            select_list(table),
            table.name,
            table.search_column
        );
        let pattern = format!("%{}%", escape_like(token));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![pattern, limit as i64], |row| record_from_row(table, row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// All rows of a table, ordered by id
    pub fn all_rows(&self, table: &TableSpec) -> Result<Vec<DomainRecord>> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", select_list(table), table.name);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| record_from_row(table, row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Whether a row with `id` exists in `table`
    pub fn row_exists(&self, table: &TableSpec, id: i64) -> Result<bool> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?1", table.name);
        let count: i64 = self.conn.query_row(&sql, params![id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Number of rows in `table`
    pub fn count_rows(&self, table: &TableSpec) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert one record; keys must be columns of `table`. Arrays and objects
    /// are stored as JSON text.
    pub fn insert_record(&self, table: &TableSpec, record: &DomainRecord) -> Result<i64> {
        let mut columns = Vec::with_capacity(record.len());
        let mut values = Vec::with_capacity(record.len());

        for (key, value) in record {
            if !table.has_column(key) {
                return Err(CampusBotError::InvalidInput(format!(
                    "Unknown column '{}' for table '{}'",
                    key, table.name
                )));
            }
            columns.push(key.as_str());
            values.push(to_sql_value(key, value)?);
        }

        if columns.is_empty() {
            return Err(CampusBotError::InvalidInput(format!(
                "Empty record for table '{}'",
                table.name
            )));
        }

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name,
            columns.join(", "),
            placeholders.join(", ")
        );
        self.conn
            .execute(&sql, rusqlite::params_from_iter(values.iter()))?;
        Ok(self.conn.last_insert_rowid())
    }
}

fn select_list(table: &TableSpec) -> String {
    std::iter::once("id")
        .chain(table.fields.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_like(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for c in token.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn record_from_row(table: &TableSpec, row: &Row<'_>) -> rusqlite::Result<DomainRecord> {
    let mut record = Map::new();
    record.insert("id".to_string(), Value::from(row.get::<_, i64>(0)?));
    for (idx, field) in table.fields.iter().enumerate() {
        let value = match row.get_ref(idx + 1)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::from(i),
            ValueRef::Real(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ValueRef::Text(bytes) => text_value(&String::from_utf8_lossy(bytes)),
            ValueRef::Blob(_) => Value::Null,
        };
        record.insert(field.to_string(), value);
    }
    Ok(record)
}

/// Text columns holding a JSON array come back as arrays
fn text_value(text: &str) -> Value {
    if text.trim_start().starts_with('[') {
        if let Ok(value @ Value::Array(_)) = serde_json::from_str::<Value>(text) {
            return value;
        }
    }
    Value::String(text.to_string())
}

fn to_sql_value(key: &str, value: &Value) -> Result<SqlValue> {
    let sql_value = match value {
        Value::Null => SqlValue::Null,
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Number(n) if key == "id" => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => {
                return Err(CampusBotError::InvalidInput(format!(
                    "Row id must be an integer, got {}",
                    n
                )))
            }
        },
        Value::Bool(_) | Value::Number(_) => SqlValue::Text(value.to_string()),
        Value::Array(_) | Value::Object(_) => SqlValue::Text(serde_json::to_string(value)?),
    };
    Ok(sql_value)
}
