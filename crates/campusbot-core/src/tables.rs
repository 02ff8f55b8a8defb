//! Domain table catalogue
//!
//! The structured tables the assistant can answer from. Each entry names the
//! column used for keyword lookups and the fields rendered into embedded
//! content.

/// Table holding one row per ingested file or uploaded text blob
pub const SOURCE_DOCUMENTS_TABLE: &str = "source_documents";

/// Static description of a domain table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    /// Column matched against the query token in keyword mode
    pub search_column: &'static str,
    /// Columns rendered into chunk content, in order
    pub fields: &'static [&'static str],
}

impl TableSpec {
    /// Whether `column` belongs to this table (the `id` column included)
    pub fn has_column(&self, column: &str) -> bool {
        column == "id" || self.fields.contains(&column)
    }

    /// `CREATE TABLE` statement for this table
    pub(crate) fn create_sql(&self) -> String {
        let columns: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{} TEXT", field))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, {})",
            self.name,
            columns.join(", ")
        )
    }
}

pub const TABLES: &[TableSpec] = &[
    TableSpec {
        name: "blocks",
        search_column: "name",
        fields: &["name", "description", "departments", "labs", "features"],
    },
    TableSpec {
        name: "clubs",
        search_column: "name",
        fields: &["name", "type", "activities", "contact_email"],
    },
    TableSpec {
        name: "contacts",
        search_column: "name",
        fields: &["name", "department", "phone", "email", "role"],
    },
    TableSpec {
        name: "courses",
        search_column: "name",
        fields: &["name", "degree", "dept", "fee", "duration", "eligibility"],
    },
    TableSpec {
        name: "events",
        search_column: "name",
        fields: &["name", "description", "date"],
    },
    TableSpec {
        name: "faqs",
        search_column: "question",
        fields: &["question", "answer", "tags"],
    },
    TableSpec {
        name: "hostels",
        search_column: "name",
        fields: &["name", "gender", "beds", "fee", "amenities", "description"],
    },
    TableSpec {
        name: "sports",
        search_column: "name",
        fields: &["name", "type", "facilities", "events", "description"],
    },
    TableSpec {
        name: "transport",
        search_column: "route",
        fields: &["route", "stops", "timings", "notes"],
    },
];

/// Look up a catalogued table by name
pub fn find_table(name: &str) -> Option<&'static TableSpec> {
    TABLES.iter().find(|t| t.name == name)
}
