//! Test builders — ergonomic constructors for `CourseRow` and `SearchConfig`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use bulletin_core::types::{Combine, CourseRow, Matching, NumberRange, Scope, SearchConfig};

// ---------------------------------------------------------------------------
// CourseRowBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`CourseRow`] test fixtures.
///
/// # Example
///
/// ```rust
/// let row = CourseRowBuilder::new("CS", "4780", "Machine Learning")
///     .college("Engineering")
///     .level("UG")
///     .description("Supervised learning from data.")
///     .build();
/// ```
pub struct CourseRowBuilder {
    subject: String,
    number: String,
    title: String,
    college: String,
    level: String,
    modality: Option<String>,
    description: String,
}

impl CourseRowBuilder {
    pub fn new(subject: &str, number: &str, title: &str) -> Self {
        Self {
            subject: subject.to_string(),
            number: number.to_string(),
            title: title.to_string(),
            college: "Arts and Sciences".to_string(),
            level: "UG".to_string(),
            modality: None,
            description: String::new(),
        }
    }

    pub fn college(mut self, college: &str) -> Self {
        self.college = college.to_string();
        self
    }

    pub fn level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn modality(mut self, modality: &str) -> Self {
        self.modality = Some(modality.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn build(self) -> CourseRow {
        CourseRow {
            subject: self.subject,
            number: self.number,
            title: self.title,
            college: self.college,
            level: self.level,
            modality: self.modality,
            description: self.description,
        }
    }
}

/// Shorthand: an undergraduate course with empty description.
pub fn course(subject: &str, number: &str, title: &str) -> CourseRow {
    CourseRowBuilder::new(subject, number, title).build()
}

// ---------------------------------------------------------------------------
// SearchConfigBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`SearchConfig`] — starts from the degenerate default
/// (no terms, no filters, fallback range, limit 200).
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Add comma/pipe separated terms through the real splitter.
    pub fn terms(mut self, raw: &str) -> Self {
        self.config.terms.add_terms(raw);
        self
    }

    pub fn all(mut self) -> Self {
        self.config.combine = Combine::All;
        self
    }

    pub fn any(mut self) -> Self {
        self.config.combine = Combine::Any;
        self
    }

    pub fn pattern_mode(mut self) -> Self {
        self.config.matching = Matching::Pattern;
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.config.scope = scope;
        self
    }

    pub fn levels(mut self, levels: &[&str]) -> Self {
        self.config.levels = levels.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn colleges(mut self, colleges: &[&str]) -> Self {
        self.config.colleges = colleges.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn subjects(mut self, subjects: &[&str]) -> Self {
        self.config.subjects = subjects.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn range(mut self, low: i64, high: i64) -> Self {
        self.config.range = NumberRange::new(low, high);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
