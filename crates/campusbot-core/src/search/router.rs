//! Keyword router: query terms → candidate domain tables

use std::collections::BTreeSet;

/// Keyword → tables. Matched as case-insensitive substrings of the query.
pub const KEYWORD_ROUTES: &[(&str, &[&str])] = &[
    ("hostel", &["hostels"]),
    ("accommodation", &["hostels"]),
    ("warden", &["hostels", "contacts"]),
    ("course", &["courses"]),
    ("program", &["courses"]),
    ("degree", &["courses"]),
    ("eligib", &["courses"]),
    ("admission", &["courses", "faqs"]),
    ("fees", &["courses", "hostels"]),
    ("tuition", &["courses"]),
    ("contact", &["contacts"]),
    ("email", &["contacts"]),
    ("phone", &["contacts"]),
    ("office", &["contacts"]),
    ("dean", &["contacts"]),
    ("club", &["clubs"]),
    ("society", &["clubs"]),
    ("events", &["events"]),
    ("festival", &["events"]),
    ("sport", &["sports"]),
    ("gym", &["sports"]),
    ("stadium", &["sports"]),
    ("transport", &["transport"]),
    ("buses", &["transport"]),
    ("shuttle", &["transport"]),
    ("timing", &["transport"]),
    ("block", &["blocks"]),
    ("building", &["blocks"]),
    ("labs", &["blocks"]),
    ("laborator", &["blocks"]),
    ("department", &["blocks", "contacts"]),
    ("faq", &["faqs"]),
];

/// Tables consulted when no keyword matches
pub const DEFAULT_TABLES: &[&str] = &["faqs", "contacts"];

/// Tables relevant to `query`
pub fn select_tables(query: &str) -> BTreeSet<&'static str> {
    let query = query.to_lowercase();

    let selected: BTreeSet<&'static str> = KEYWORD_ROUTES
        .iter()
        .filter(|(keyword, _)| query.contains(keyword))
        .flat_map(|(_, tables)| tables.iter().copied())
        .collect();

    if selected.is_empty() {
        DEFAULT_TABLES.iter().copied().collect()
    } else {
        selected
    }
}

/// First whitespace-delimited token, stripped of surrounding punctuation
pub fn first_token(query: &str) -> Option<&str> {
    query
        .split_whitespace()
        .next()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
}
