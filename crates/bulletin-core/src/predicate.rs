//! Predicate compiler — turns a [`SearchConfig`] into a boolean expression
//! tree over course rows, plus the in-memory evaluator for that tree.
//!
//! # Architecture
//!
//! ```text
//! SearchConfig ──compile──► Predicate ──┬── Evaluator (in-memory rows)
//!                                       └── sql::where_clause (SQL backend)
//! ```
//!
//! `compile` is a pure, total function: it never errors, never touches the
//! catalog, and never executes anything. Degenerate inputs (no terms, no
//! filters) degenerate to a predicate that only restricts the course-number
//! range — an all-empty search must not filter out every row.
//!
//! Raw patterns are *not* validated here. They are carried verbatim in the
//! tree and only compiled when an [`Evaluator`] is built, which is where a
//! malformed pattern surfaces as a [`PatternError`].

use crate::normalize::{normalize_phrase, phrase_contains};
use crate::types::{Combine, CourseRow, Matching, Scope, SearchConfig};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// A text column a term predicate can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Description,
}

impl TextField {
    /// The row text this field selects.
    pub fn of<'r>(&self, row: &'r CourseRow) -> &'r str {
        match self {
            TextField::Title => &row.title,
            TextField::Description => &row.description,
        }
    }
}

/// A categorical column a membership predicate can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetField {
    Level,
    College,
    Subject,
}

impl FacetField {
    pub fn of<'r>(&self, row: &'r CourseRow) -> &'r str {
        match self {
            FacetField::Level => &row.level,
            FacetField::College => &row.college,
            FacetField::Subject => &row.subject,
        }
    }
}

// ---------------------------------------------------------------------------
// Predicate tree
// ---------------------------------------------------------------------------

/// A boolean filter expression over course rows.
///
/// Plain data: no query text, no compiled regexes, no row references.
/// Consumers decide how to execute it — [`Evaluator`] walks rows in memory,
/// [`crate::sql`] renders a parameterized WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every row. The identity for AND-composition.
    True,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    /// Whole-token phrase containment against the normalized field text.
    /// `phrase` is already normalized (§ normalize) and non-empty.
    Phrase { field: TextField, phrase: String },
    /// Case-insensitive raw pattern match, passed through unvalidated.
    Pattern { field: TextField, pattern: String },
    /// Field value is a member of the selected set.
    OneOf { field: FacetField, values: Vec<String> },
    /// Course number parses as a number within `[low, high]`; unparseable
    /// numbers are excluded.
    NumberInRange { low: i64, high: i64 },
}

impl Predicate {
    /// AND-combine, unwrapping the trivial cases so `compile` output stays
    /// readable: zero clauses → `True`, one clause → the clause itself.
    fn and(mut clauses: Vec<Predicate>) -> Predicate {
        match clauses.len() {
            0 => Predicate::True,
            1 => clauses.remove(0),
            _ => Predicate::And(clauses),
        }
    }

    fn or(mut clauses: Vec<Predicate>) -> Predicate {
        match clauses.len() {
            0 => Predicate::True,
            1 => clauses.remove(0),
            _ => Predicate::Or(clauses),
        }
    }

    /// Every raw pattern carried anywhere in this tree.
    fn patterns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_patterns(&mut out);
        out
    }

    fn collect_patterns<'p>(&'p self, out: &mut Vec<&'p str>) {
        match self {
            Predicate::And(children) | Predicate::Or(children) => {
                for child in children {
                    child.collect_patterns(out);
                }
            }
            Predicate::Pattern { pattern, .. } => out.push(pattern),
            Predicate::True
            | Predicate::Phrase { .. }
            | Predicate::OneOf { .. }
            | Predicate::NumberInRange { .. } => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

/// Compile a search configuration into a predicate tree.
///
/// Total function: any configuration — including a completely empty one —
/// yields a valid predicate. The degenerate output is the bare range
/// clause, which is always present and always last.
pub fn compile(config: &SearchConfig) -> Predicate {
    let mut clauses = Vec::new();

    let term_group: Vec<Predicate> = config
        .terms
        .iter()
        .filter_map(|term| term_predicate(term, config.matching, config.scope))
        .collect();
    if !term_group.is_empty() {
        clauses.push(match config.combine {
            Combine::All => Predicate::and(term_group),
            Combine::Any => Predicate::or(term_group),
        });
    }

    for (field, values) in [
        (FacetField::Level, &config.levels),
        (FacetField::College, &config.colleges),
        (FacetField::Subject, &config.subjects),
    ] {
        if !values.is_empty() {
            clauses.push(Predicate::OneOf {
                field,
                values: values.clone(),
            });
        }
    }

    clauses.push(Predicate::NumberInRange {
        low: config.range.low,
        high: config.range.high,
    });

    Predicate::and(clauses)
}

/// Build the predicate for one term, or `None` when the term contributes
/// nothing (smart mode, normalizes to empty).
fn term_predicate(term: &str, matching: Matching, scope: Scope) -> Option<Predicate> {
    match matching {
        Matching::Smart => {
            let phrase = normalize_phrase(term);
            if phrase.is_empty() {
                tracing::debug!(term, "compile: term normalized to empty, dropped");
                return None;
            }
            Some(scope_fanout(scope, |field| Predicate::Phrase {
                field,
                phrase: phrase.clone(),
            }))
        }
        Matching::Pattern => Some(scope_fanout(scope, |field| Predicate::Pattern {
            field,
            pattern: term.to_string(),
        })),
    }
}

/// Apply a per-field predicate constructor across the scope: one field for
/// Title/Description, an OR of both for Both.
fn scope_fanout(scope: Scope, make: impl Fn(TextField) -> Predicate) -> Predicate {
    match scope {
        Scope::Title => make(TextField::Title),
        Scope::Description => make(TextField::Description),
        Scope::Both => Predicate::or(vec![make(TextField::Title), make(TextField::Description)]),
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// A raw pattern failed to compile as a regular expression.
///
/// This is deliberately the only failure in the whole compile-and-evaluate
/// path, and it surfaces at evaluator construction — "query execution"
/// time — not during predicate compilation.
#[derive(Debug, thiserror::Error)]
#[error("invalid pattern {pattern:?}: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// In-memory executor for a [`Predicate`].
///
/// Construction pre-compiles every raw pattern in the tree (case-insensitive,
/// matching the SQL backend's `REGEXP_LIKE(…, 'i')`) exactly once, so
/// evaluation over a large catalog does not recompile per row.
#[derive(Debug)]
pub struct Evaluator<'p> {
    predicate: &'p Predicate,
    regexes: HashMap<String, regex::Regex>,
}

impl<'p> Evaluator<'p> {
    pub fn new(predicate: &'p Predicate) -> Result<Self, PatternError> {
        let mut regexes = HashMap::new();
        for pattern in predicate.patterns() {
            if regexes.contains_key(pattern) {
                continue;
            }
            let regex = regex::RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| PatternError {
                    pattern: pattern.to_string(),
                    source,
                })?;
            regexes.insert(pattern.to_string(), regex);
        }
        Ok(Self { predicate, regexes })
    }

    pub fn matches(&self, row: &CourseRow) -> bool {
        self.eval(self.predicate, row)
    }

    fn eval(&self, predicate: &Predicate, row: &CourseRow) -> bool {
        match predicate {
            Predicate::True => true,
            Predicate::And(children) => children.iter().all(|c| self.eval(c, row)),
            Predicate::Or(children) => children.iter().any(|c| self.eval(c, row)),
            Predicate::Phrase { field, phrase } => {
                phrase_contains(&normalize_phrase(field.of(row)), phrase)
            }
            Predicate::Pattern { field, pattern } => self.regexes[pattern.as_str()]
                .is_match(field.of(row)),
            Predicate::OneOf { field, values } => {
                let value = field.of(row);
                values.iter().any(|v| v == value)
            }
            Predicate::NumberInRange { low, high } => {
                crate::types::NumberRange { low: *low, high: *high }.contains_str(&row.number)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumberRange;

    fn row(title: &str, description: &str) -> CourseRow {
        CourseRow {
            subject: "CS".into(),
            number: "4780".into(),
            title: title.into(),
            college: "Engineering".into(),
            level: "UG".into(),
            modality: None,
            description: description.into(),
        }
    }

    fn matches(predicate: &Predicate, row: &CourseRow) -> bool {
        Evaluator::new(predicate).expect("valid predicate").matches(row)
    }

    #[test]
    fn empty_config_reduces_to_range_only() {
        let predicate = compile(&SearchConfig::default());
        assert_eq!(
            predicate,
            Predicate::NumberInRange {
                low: NumberRange::FALLBACK.low,
                high: NumberRange::FALLBACK.high
            }
        );
    }

    #[test]
    fn whitespace_terms_contribute_nothing() {
        let mut config = SearchConfig::default();
        config.terms.add_terms("!!!, ???");
        // Both terms normalize to empty — tree degenerates to the range
        let predicate = compile(&config);
        assert!(matches!(predicate, Predicate::NumberInRange { .. }));
    }

    #[test]
    fn smart_term_fans_out_over_scope_both() {
        let mut config = SearchConfig::default();
        config.terms.add_terms("deep learning");
        let predicate = compile(&config);

        let titled = row("Deep Learning Foundations", "");
        let described = row("Seminar", "A survey of deep-learning methods.");
        let neither = row("Databases", "Relational algebra.");
        assert!(matches(&predicate, &titled));
        assert!(matches(&predicate, &described));
        assert!(!matches(&predicate, &neither));
    }

    #[test]
    fn phrase_order_and_boundaries_matter() {
        let mut config = SearchConfig::default();
        config.scope = Scope::Title;
        config.terms.add_terms("deep learning");
        let predicate = compile(&config);

        assert!(matches(&predicate, &row("Intro to Deep Learning", "")));
        assert!(!matches(&predicate, &row("Learning Deep Structures", "")));
        assert!(!matches(&predicate, &row("DeepLearning Bootcamp", "")));
    }

    #[test]
    fn combine_all_vs_any() {
        let base = {
            let mut c = SearchConfig::default();
            c.scope = Scope::Title;
            c.terms.add_terms("ai, ml");
            c
        };
        let both = row("AI and ML methods", "");
        let only_ai = row("AI ethics", "");

        let mut all = base.clone();
        all.combine = Combine::All;
        let all = compile(&all);
        assert!(matches(&all, &both));
        assert!(!matches(&all, &only_ai));

        let mut any = base;
        any.combine = Combine::Any;
        let any = compile(&any);
        assert!(matches(&any, &both));
        assert!(matches(&any, &only_ai));
    }

    #[test]
    fn facet_filters_are_membership() {
        let mut config = SearchConfig::default();
        config.levels = vec!["GR".into()];
        let predicate = compile(&config);
        let ug = row("t", "d");
        assert!(!matches(&predicate, &ug));
        let mut gr = row("t", "d");
        gr.level = "GR".into();
        assert!(matches(&predicate, &gr));
    }

    #[test]
    fn range_clause_is_unconditional_and_inclusive() {
        let mut config = SearchConfig::default();
        config.range = NumberRange::new(3000, 5999);
        let predicate = compile(&config);

        for (number, expect) in [("2999", false), ("3000", true), ("5999", true), ("481W", false)] {
            let mut r = row("t", "d");
            r.number = number.into();
            assert_eq!(matches(&predicate, &r), expect, "number {number:?}");
        }
    }

    #[test]
    fn pattern_mode_is_case_insensitive_and_unnormalized() {
        let mut config = SearchConfig::default();
        config.matching = Matching::Pattern;
        config.scope = Scope::Title;
        config.terms.add_terms("mach.*learn");
        let predicate = compile(&config);
        assert!(matches(&predicate, &row("Machine Learning", "")));
        assert!(!matches(&predicate, &row("Learning Machines", "")));
    }

    #[test]
    fn invalid_pattern_fails_at_evaluator_not_compile() {
        let mut config = SearchConfig::default();
        config.matching = Matching::Pattern;
        config.terms.add_terms("ab(");
        // Compilation is total…
        let predicate = compile(&config);
        // …the error surfaces when the evaluator compiles patterns.
        let err = Evaluator::new(&predicate).unwrap_err();
        assert_eq!(err.pattern, "ab(");
    }
}
