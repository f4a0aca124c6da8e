//! CSV export of search results.
//!
//! Exports the same fixed projection the result table shows, in the same
//! column order. Zero matching rows produce a header-only file — an empty
//! result set is a valid export, not an error.

use crate::types::CourseRow;
use std::io::Write;
use std::path::Path;

/// CSV header row, matching the result projection order.
pub const CSV_HEADERS: &[&str] = &[
    "subject_code",
    "course_number",
    "title",
    "college",
    "modality",
    "description",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize row: {0}")]
    Csv(#[from] csv::Error),
}

/// Write `rows` as CSV to any writer. Quoting and escaping are the csv
/// crate's concern — descriptions routinely contain commas and quotes.
pub fn write_csv<W: Write>(writer: W, rows: &[CourseRow]) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADERS)?;
    for row in rows {
        out.write_record([
            row.subject.as_str(),
            row.number.as_str(),
            row.title.as_str(),
            row.college.as_str(),
            row.modality.as_deref().unwrap_or(""),
            row.description.as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Write `rows` to a CSV file at `path`, returning the exported row count.
pub fn export_csv(path: &Path, rows: &[CourseRow]) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), rows)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "export: wrote csv");
    Ok(rows.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
