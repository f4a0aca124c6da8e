//! bulletin-core — core library for bulletin.
//!
//! This crate holds the search predicate compiler and everything it needs:
//! the shared types, the term normalizer, the term-set mutator, the SQL
//! renderer, and the CSV exporter. Nothing in here performs I/O against a
//! catalog or a terminal — that is the job of `bulletin-catalog` and
//! `bulletin-tui`.
//!
//! # Architecture
//!
//! ```text
//! TermSet + filters + range        (session state, mutated by the UI)
//!        │
//!        ▼
//! SearchConfig ──compile──► Predicate ──┬─► Evaluator ─► in-memory rows
//!                                       └─► sql::where_clause ─► SQL backend
//! ```
//!
//! `compile` is pure and total; every interaction rebuilds the whole
//! predicate from scratch and hands it to exactly one executor.

pub mod config;
pub mod export;
pub mod normalize;
pub mod predicate;
pub mod sql;
pub mod terms;
pub mod types;

pub use predicate::{compile, Evaluator, PatternError, Predicate};
pub use terms::TermSet;
pub use types::{
    Combine, CourseRow, Matching, NumberRange, Scope, SearchConfig, DEFAULT_LIMIT, LIMIT_OPTIONS,
};
