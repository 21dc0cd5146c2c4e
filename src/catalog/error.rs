//! Catalog errors.

use thiserror::Error;

use crate::domain::{RecordId, RecordKind};

/// Errors raised while building or selecting catalogs
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Duplicate {kind} id '{id}': first defined in {first_source}, again in {second_source}")]
    DuplicateId {
        kind: RecordKind,
        id: RecordId,
        first_source: String,
        second_source: String,
    },

    #[error("Unknown exam '{code}' (available: {})", available.join(", "))]
    UnknownExam { code: String, available: Vec<String> },

    #[error("Several exams are loaded ({}); choose one with --exam", available.join(", "))]
    AmbiguousExam { available: Vec<String> },

    #[error("Exam '{code}' is provided by both {first} and {second}")]
    DuplicateExam {
        code: String,
        first: String,
        second: String,
    },
}
