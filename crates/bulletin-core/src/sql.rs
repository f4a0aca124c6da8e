//! SQL rendering — turns a [`Predicate`] into a parameterized WHERE clause.
//!
//! This is the backend for SQL-hosted deployments of the same view the
//! in-memory catalog mirrors. Rendering produces `?` placeholders with a
//! typed parameter list; user text never appears in the SQL string, so no
//! quote-escaping is performed or needed anywhere.
//!
//! Phrase predicates render the normalized-column LIKE form: the column is
//! lowercased, every non-alphanumeric run collapsed to a single space, and
//! padded with one leading/trailing space so a `% phrase %` parameter can
//! only match at token boundaries — the SQL twin of
//! [`normalize::phrase_contains`](crate::normalize::phrase_contains).

use crate::predicate::{FacetField, Predicate, TextField};

/// A parameter bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
}

/// A rendered SQL fragment plus its bound parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Columns of the fixed result projection, in output order.
pub const PROJECTION: &[&str] = &[
    "subject_code",
    "course_number",
    "title",
    "college",
    "modality",
    "description",
];

fn text_column(field: TextField) -> &'static str {
    match field {
        TextField::Title => "title",
        TextField::Description => "description",
    }
}

fn facet_column(field: FacetField) -> &'static str {
    match field {
        FacetField::Level => "career_label",
        FacetField::College => "college",
        FacetField::Subject => "subject_code",
    }
}

/// The tokenized form of a text column, padded for boundary-safe LIKE.
fn normalized_column(field: TextField) -> String {
    format!(
        "CONCAT(' ', REGEXP_REPLACE(LOWER({}), '[^a-z0-9]+', ' '), ' ')",
        text_column(field)
    )
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a predicate as a WHERE-clause body (without the `WHERE` keyword).
pub fn where_clause(predicate: &Predicate) -> SqlFragment {
    let mut params = Vec::new();
    let sql = render(predicate, &mut params);
    SqlFragment { sql, params }
}

/// Render the full SELECT the collaborator executes once per interaction:
/// fixed projection, the given predicate, the fixed two-column ORDER BY,
/// and the row cap.
pub fn select_from(view: &str, predicate: &Predicate, limit: usize) -> SqlFragment {
    let SqlFragment { sql: body, params } = where_clause(predicate);
    let sql = format!(
        "SELECT {projection} FROM {view} WHERE {body} ORDER BY subject_code, course_number LIMIT {limit}",
        projection = PROJECTION.join(", "),
    );
    SqlFragment { sql, params }
}

fn render(predicate: &Predicate, params: &mut Vec<SqlValue>) -> String {
    match predicate {
        Predicate::True => "TRUE".to_string(),
        Predicate::And(children) => render_group(children, " AND ", params),
        Predicate::Or(children) => render_group(children, " OR ", params),
        Predicate::Phrase { field, phrase } => {
            params.push(SqlValue::Text(format!("% {phrase} %")));
            format!("{} LIKE ?", normalized_column(*field))
        }
        Predicate::Pattern { field, pattern } => {
            params.push(SqlValue::Text(pattern.clone()));
            format!("REGEXP_LIKE({}, ?, 'i')", text_column(*field))
        }
        Predicate::OneOf { field, values } => {
            let placeholders = vec!["?"; values.len()].join(", ");
            params.extend(values.iter().cloned().map(SqlValue::Text));
            format!("{} IN ({placeholders})", facet_column(*field))
        }
        Predicate::NumberInRange { low, high } => {
            params.push(SqlValue::Int(*low));
            params.push(SqlValue::Int(*high));
            "TRY_TO_NUMBER(course_number) BETWEEN ? AND ?".to_string()
        }
    }
}

fn render_group(children: &[Predicate], joiner: &str, params: &mut Vec<SqlValue>) -> String {
    let parts: Vec<String> = children
        .iter()
        .map(|child| {
            let rendered = render(child, params);
            // Parenthesize nested composites so AND/OR precedence is explicit
            match child {
                Predicate::And(_) | Predicate::Or(_) => format!("({rendered})"),
                _ => rendered,
            }
        })
        .collect();
    parts.join(joiner)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
