//! bulletin-catalog — catalog loading and query execution for bulletin.
//!
//! The catalog is the read-only course view the rest of the system queries.
//! It is loaded once from a local file (CSV or JSON Lines), after which
//! this crate plays the "collaborator" role around the predicate compiler:
//! it supplies the distinct filter vocabularies and the course-number
//! domain at session start, and runs one query per interaction.

pub mod catalog;

pub use catalog::{Catalog, CatalogError, QueryError, Vocabulary};
