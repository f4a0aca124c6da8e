//! Core types for bulletin-core.
//!
//! This module defines the data structures shared across all layers: the
//! catalog [`CourseRow`], the search-mode enums, the safe [`NumberRange`],
//! and the aggregate [`SearchConfig`] consumed by the predicate compiler.

use serde::Deserialize;

/// One row of the read-only course view.
///
/// Field names follow Rust conventions; the serde renames map back to the
/// column names of the backing view so CSV/JSONL catalog files can use the
/// view's headers directly. `number` is kept as raw text because the
/// backing data is dirty — rows with non-numeric course numbers exist and
/// are excluded from range filtering rather than rejected at load time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseRow {
    /// Subject code (e.g. "CS", "PHIL").
    #[serde(rename = "subject_code")]
    pub subject: String,
    /// Course number as stored — usually numeric text, not always.
    #[serde(rename = "course_number")]
    pub number: String,
    pub title: String,
    pub college: String,
    /// Career label: UG / GR / LAW in the source data.
    #[serde(rename = "career_label", default)]
    pub level: String,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Which text field(s) a search term is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    Title,
    Description,
    #[default]
    Both,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Title => write!(f, "title"),
            Scope::Description => write!(f, "desc"),
            Scope::Both => write!(f, "both"),
        }
    }
}

/// Whether every term must match (AND) or at least one (OR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    All,
    #[default]
    Any,
}

impl std::fmt::Display for Combine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Combine::All => write!(f, "ALL"),
            Combine::Any => write!(f, "ANY"),
        }
    }
}

/// How a term is interpreted: tokenized whole-phrase matching, or a raw
/// case-insensitive pattern passed through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Matching {
    #[default]
    Smart,
    Pattern,
}

impl std::fmt::Display for Matching {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matching::Smart => write!(f, "smart"),
            Matching::Pattern => write!(f, "regex"),
        }
    }
}

// ---------------------------------------------------------------------------
// NumberRange
// ---------------------------------------------------------------------------

/// Inclusive course-number range. Invariant: `low <= high`.
///
/// Constructed from the observed catalog domain via [`NumberRange::from_domain`],
/// which falls back to [`NumberRange::FALLBACK`] whenever the domain is
/// degenerate (no parseable course numbers, or min >= max).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    pub low: i64,
    pub high: i64,
}

impl NumberRange {
    /// The safe default used when the observed domain is unusable.
    pub const FALLBACK: NumberRange = NumberRange { low: 0, high: 9999 };

    /// Build a range from an observed (min, max) domain.
    ///
    /// Returns the full observed domain, or [`Self::FALLBACK`] when either
    /// bound is missing or `min >= max`.
    pub fn from_domain(min: Option<i64>, max: Option<i64>) -> Self {
        match (min, max) {
            (Some(low), Some(high)) if low < high => NumberRange { low, high },
            _ => Self::FALLBACK,
        }
    }

    /// Build a user-chosen sub-range, swapping the bounds if given reversed.
    pub fn new(low: i64, high: i64) -> Self {
        if low <= high {
            NumberRange { low, high }
        } else {
            NumberRange { low: high, high: low }
        }
    }

    /// Whether a raw course-number string falls inside this range.
    ///
    /// Parsing mirrors the permissive numeric coercion of the backing
    /// store: trimmed, decimal forms accepted. Unparseable values are
    /// excluded, never an error.
    pub fn contains_str(&self, number: &str) -> bool {
        match number.trim().parse::<f64>() {
            Ok(n) => n >= self.low as f64 && n <= self.high as f64,
            Err(_) => false,
        }
    }
}

impl Default for NumberRange {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl std::fmt::Display for NumberRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// The fixed set of result-row caps offered by the UI.
pub const LIMIT_OPTIONS: &[usize] = &[50, 100, 200, 500, 1000];

/// Default result-row cap.
pub const DEFAULT_LIMIT: usize = 200;

/// The aggregate input to the predicate compiler — one immutable snapshot
/// of the search state per compilation.
///
/// Every interaction rebuilds this from UI state and hands it to
/// [`compile`](crate::predicate::compile); the compiler never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub terms: crate::terms::TermSet,
    pub combine: Combine,
    pub matching: Matching,
    pub scope: Scope,
    /// Selected career labels; empty = no restriction.
    pub levels: Vec<String>,
    /// Selected colleges; empty = no restriction.
    pub colleges: Vec<String>,
    /// Selected subject codes; empty = no restriction.
    pub subjects: Vec<String>,
    pub range: NumberRange,
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            terms: crate::terms::TermSet::default(),
            combine: Combine::default(),
            matching: Matching::default(),
            scope: Scope::default(),
            levels: Vec::new(),
            colleges: Vec::new(),
            subjects: Vec::new(),
            range: NumberRange::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
