//! The in-memory course catalog: loading, vocabularies, domain, queries.
//!
//! Loading accepts CSV (with the view's column headers) or JSON Lines (one
//! object per line, same field names). Rows are kept exactly as loaded —
//! dirty course numbers included — because exclusion of unparseable numbers
//! is range-filtering's job, not the loader's.

use bulletin_core::predicate::{compile, Evaluator, PatternError};
use bulletin_core::types::{CourseRow, NumberRange, SearchConfig};
use std::io::BufRead;
use std::path::Path;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse catalog JSONL line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
    #[error("unsupported catalog format {extension:?} (expected .csv or .jsonl)")]
    UnsupportedFormat { extension: String },
}

/// A query failed at execution time. Compilation itself cannot fail; the
/// only failure is a raw pattern that does not compile.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Distinct filter values per facet dimension, fetched once per session.
///
/// Values are sorted and deduplicated; empty values (the view's NULLs)
/// are skipped and never offered as filter options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    pub levels: Vec<String>,
    pub colleges: Vec<String>,
    pub subjects: Vec<String>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The loaded, immutable course catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rows: Vec<CourseRow>,
}

impl Catalog {
    pub fn from_rows(rows: Vec<CourseRow>) -> Self {
        Self { rows }
    }

    /// Load a catalog file, dispatching on the file extension.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Self::load_csv(path),
            "jsonl" | "ndjson" => Self::load_jsonl(path),
            _ => Err(CatalogError::UnsupportedFormat { extension }),
        }
    }

    /// Load from CSV with the view's column headers.
    pub fn load_csv(path: &Path) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path)?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<CourseRow>, _>>()?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "catalog: loaded csv");
        Ok(Self { rows })
    }

    /// Load from JSON Lines — one course object per non-blank line.
    pub fn load_jsonl(path: &Path) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        let mut rows = Vec::new();
        for (idx, line) in std::io::BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let row = serde_json::from_str(&line)
                .map_err(|source| CatalogError::Json { line: idx + 1, source })?;
            rows.push(row);
        }
        tracing::debug!(path = %path.display(), rows = rows.len(), "catalog: loaded jsonl");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[CourseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct, sorted facet values — the session-start vocabulary pull.
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary {
            levels: distinct(self.rows.iter().map(|r| r.level.as_str())),
            colleges: distinct(self.rows.iter().map(|r| r.college.as_str())),
            subjects: distinct(self.rows.iter().map(|r| r.subject.as_str())),
        }
    }

    /// The observed course-number domain, with the degenerate fallback
    /// applied. Unparseable numbers do not participate.
    pub fn number_domain(&self) -> NumberRange {
        let mut min: Option<i64> = None;
        let mut max: Option<i64> = None;
        for row in &self.rows {
            // Whole numbers only for the slider bounds; the permissive f64
            // parse stays in range evaluation
            if let Ok(n) = row.number.trim().parse::<f64>() {
                if n.is_finite() {
                    let n = n as i64;
                    min = Some(min.map_or(n, |m| m.min(n)));
                    max = Some(max.map_or(n, |m| m.max(n)));
                }
            }
        }
        NumberRange::from_domain(min, max)
    }

    /// Run one search: compile the predicate, evaluate it over every row,
    /// sort by the fixed (subject, number) order, and truncate to the cap.
    pub fn query(&self, config: &SearchConfig) -> Result<Vec<CourseRow>, QueryError> {
        let predicate = compile(config);
        let evaluator = Evaluator::new(&predicate)?;

        let mut matched: Vec<CourseRow> = self
            .rows
            .iter()
            .filter(|row| evaluator.matches(row))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            a.subject
                .cmp(&b.subject)
                .then_with(|| a.number.cmp(&b.number))
        });
        matched.truncate(config.limit);

        tracing::debug!(
            terms = config.terms.len(),
            matched = matched.len(),
            limit = config.limit,
            "catalog: query"
        );
        Ok(matched)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    out.sort();
    out.dedup();
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
