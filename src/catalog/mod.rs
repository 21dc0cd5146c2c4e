//! The content catalog: aggregation, queries, statistics and validation.
//!
//! # Data flow
//!
//! ```text
//! topic files ──► TopicSource<R> ──► aggregate() ──► Catalog<R>
//!                                                     │
//!                         ExamDefinition ──► CatalogStats::build()
//! ```
//!
//! A catalog is a plain value: build one per content pack, share it by
//! reference, and never mutate it.

pub mod aggregate;
pub mod collection;
pub mod error;
pub mod stats;
pub mod summary;
pub mod validation;

pub use aggregate::{aggregate, TopicSource};
pub use collection::{Catalog, DuplicateId, DuplicatePolicy};
pub use error::CatalogError;
pub use stats::{CatalogStats, DomainStats};
pub use summary::{DifficultyCounts, LessonSummary, QuestionSummary, Summarize, Summary};
pub use validation::{
    validate_catalog, validate_exam, validate_related_lessons, Issue, Severity, ValidationReport,
};
