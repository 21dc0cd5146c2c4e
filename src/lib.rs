//! prepcat - read-only content catalog for exam-prep material
//!
//! Lessons and practice questions for certification exams (CFP, CISA, ...)
//! are authored as topic files, grouped into one content pack per exam, and
//! loaded once into immutable catalogs.
//!
//! # Architecture
//!
//! - Topic files are aggregated, in manifest order, into one `Catalog` per
//!   record kind; ids are checked for uniqueness at construction
//! - Queries (`by_domain`, `by_area`, `by_id`) are pure reads
//! - Per-domain statistics are derived from the same queries
//!
//! # Modules
//!
//! - `domain`: Record types (Lesson, Question) and exam metadata
//! - `catalog`: Aggregation, queries, statistics, validation
//! - `library`: Loading packs and topic files from disk
//! - `config`: Config file and environment resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Per-domain lesson counts
//! prepcat --content ./content --exam cfp domains
//!
//! # Lessons in one blueprint area
//! prepcat --exam cfp list --area GEN-1
//!
//! # Check content before shipping it
//! prepcat validate --strict
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use catalog::{Catalog, CatalogError, CatalogStats, DomainStats, DuplicatePolicy, TopicSource};
pub use domain::{ExamDefinition, Lesson, Question, Record, RecordId, RecordKind};
pub use library::{ContentPack, Library};
