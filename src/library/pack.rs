//! Content packs: one exam's lessons, questions and statistics.
//!
//! # Layout
//!
//! ```text
//! content/cfp/
//! ├── pack.yaml            # ExamDefinition: domains, weights, areas, topic files
//! ├── lessons/
//! │   ├── gen_planning_process.yaml
//! │   └── tax_fundamentals.yaml
//! └── questions/
//!     └── tax.json
//! ```
//!
//! Topic files are aggregated in manifest order: domain by domain, and within
//! a domain in the order the files are listed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs;
use tracing::info;

use super::source::{is_file, load_topic_files};
use crate::catalog::{
    validate_catalog, validate_exam, validate_related_lessons, Catalog, CatalogStats,
    DuplicatePolicy, TopicSource, ValidationReport,
};
use crate::domain::{ExamDefinition, Lesson, Question, Record, RecordKind};

/// Manifest file name inside a pack directory
pub const MANIFEST_FILE: &str = "pack.yaml";

/// A loaded exam pack
#[derive(Debug, Clone)]
pub struct ContentPack {
    /// Pack directory (empty for packs built in memory)
    pub root: PathBuf,

    pub exam: ExamDefinition,

    pub lessons: Catalog<Lesson>,

    pub questions: Catalog<Question>,

    lesson_stats: CatalogStats,

    question_stats: CatalogStats,
}

/// A record found by id in either catalog of a pack
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FoundRecord<'a> {
    Lesson(&'a Lesson),
    Question(&'a Question),
}

impl FoundRecord<'_> {
    pub fn kind(&self) -> RecordKind {
        match self {
            FoundRecord::Lesson(_) => RecordKind::Lesson,
            FoundRecord::Question(_) => RecordKind::Question,
        }
    }
}

impl ContentPack {
    /// Assemble a pack from already-built catalogs; statistics are computed here
    pub fn from_parts(
        exam: ExamDefinition,
        lessons: Catalog<Lesson>,
        questions: Catalog<Question>,
    ) -> Self {
        let lesson_stats = CatalogStats::build(&lessons, &exam);
        let question_stats = CatalogStats::build(&questions, &exam);

        Self {
            root: PathBuf::new(),
            exam,
            lessons,
            questions,
            lesson_stats,
            question_stats,
        }
    }

    /// Whether a directory holds a pack manifest
    pub async fn is_pack_dir(dir: &Path) -> bool {
        is_file(&dir.join(MANIFEST_FILE)).await
    }

    /// Load a pack directory
    pub async fn load(dir: &Path, policy: DuplicatePolicy) -> Result<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);

        let manifest = fs::read_to_string(&manifest_path)
            .await
            .with_context(|| format!("Failed to read pack manifest: {}", manifest_path.display()))?;

        let exam = ExamDefinition::from_yaml(&manifest)
            .with_context(|| format!("Invalid pack manifest: {}", manifest_path.display()))?;
        exam.validate()
            .with_context(|| format!("Invalid pack manifest: {}", manifest_path.display()))?;

        let lessons = load_catalog::<Lesson>(dir, &exam, policy).await?;
        let questions = load_catalog::<Question>(dir, &exam, policy).await?;

        info!(
            exam = %exam.code,
            lessons = lessons.len(),
            questions = questions.len(),
            fingerprint = %lessons.fingerprint(),
            "Loaded content pack"
        );

        let mut pack = Self::from_parts(exam, lessons, questions);
        pack.root = dir.to_path_buf();
        Ok(pack)
    }

    /// Exam code
    pub fn code(&self) -> &str {
        &self.exam.code
    }

    /// Statistics for one record kind
    pub fn stats(&self, kind: RecordKind) -> &CatalogStats {
        match kind {
            RecordKind::Lesson => &self.lesson_stats,
            RecordKind::Question => &self.question_stats,
        }
    }

    /// Look an id up in lessons first, then questions
    pub fn find(&self, id: &str) -> Option<FoundRecord<'_>> {
        self.lessons
            .by_id(id)
            .map(FoundRecord::Lesson)
            .or_else(|| self.questions.by_id(id).map(FoundRecord::Question))
    }

    /// Topic source of a record found by [`ContentPack::find`]
    pub fn source_of(&self, id: &str) -> Option<&str> {
        self.lessons
            .source_of(id)
            .or_else(|| self.questions.source_of(id))
    }

    /// Run every validation check over the pack
    pub fn validate(&self) -> ValidationReport {
        let mut report = validate_exam(&self.exam);
        report.merge(validate_catalog(&self.lessons, &self.exam));
        report.merge(validate_catalog(&self.questions, &self.exam));
        report.merge(validate_related_lessons(&self.lessons));
        report
    }
}

async fn load_catalog<R: Record>(
    dir: &Path,
    exam: &ExamDefinition,
    policy: DuplicatePolicy,
) -> Result<Catalog<R>> {
    // One pass over every domain's entries, so a file shared by two domains
    // is read once
    let patterns: Vec<String> = exam
        .domains
        .iter()
        .flat_map(|domain| domain.topic_patterns(R::KIND).iter().cloned())
        .collect();
    let sources: Vec<TopicSource<R>> = load_topic_files(dir, &patterns).await?;

    Catalog::from_sources(sources, policy)
        .with_context(|| format!("Failed to build {} catalog for exam '{}'", R::KIND, exam.code))
}
