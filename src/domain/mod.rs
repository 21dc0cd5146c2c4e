//! Domain types for the content catalog.
//!
//! - Record: the shared classification shape (id, domain, area, order)
//! - Lesson / Question: the two concrete record kinds
//! - Exam: static per-exam metadata (domains, weights, areas)

pub mod exam;
pub mod lesson;
pub mod question;
pub mod record;

// Re-export commonly used types
pub use exam::{AreaDefinition, DomainDefinition, ExamDefinition, ExamWeight};
pub use lesson::{Lesson, LessonDifficulty};
pub use question::{Question, QuestionDifficulty};
pub use record::{Record, RecordId, RecordKind};
