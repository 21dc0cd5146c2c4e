//! Development-time validation of loaded content.
//!
//! Nothing here changes query behaviour. The report lists authoring problems
//! that the type system cannot catch: tolerated duplicate ids, records in
//! undeclared domains or areas, dangling cross-references and malformed
//! questions.

use std::collections::HashSet;

use serde::Serialize;

use super::collection::Catalog;
use crate::domain::{ExamDefinition, Lesson, Record, RecordId, RecordKind};

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,

    /// Record kind, when the issue concerns a record
    pub kind: Option<RecordKind>,

    pub record: Option<RecordId>,

    /// Topic source or manifest the issue was found in
    pub source: Option<String>,

    pub message: String,
}

impl Issue {
    fn exam(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind: None,
            record: None,
            source: None,
            message: message.into(),
        }
    }

    fn record<R: Record>(severity: Severity, record: &R, source: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind: Some(R::KIND),
            record: Some(record.id().clone()),
            source: Some(source.to_string()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.severity)?;
        if let (Some(kind), Some(id)) = (&self.kind, &self.record) {
            write!(f, " {} {}", kind, id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Collected findings
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Append another report's findings
    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether the content passes: no errors, and no warnings when `strict`
    pub fn passes(&self, strict: bool) -> bool {
        if strict {
            self.is_clean()
        } else {
            !self.has_errors()
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check the exam definition itself
pub fn validate_exam(exam: &ExamDefinition) -> ValidationReport {
    let mut report = ValidationReport::new();

    if let Some(total) = exam.fixed_weight_total() {
        if total != 100 {
            report.push(Issue::exam(
                Severity::Warning,
                format!("Domain weights of exam '{}' sum to {}%, not 100%", exam.code, total),
            ));
        }
    }

    for domain in &exam.domains {
        if domain.lessons.is_empty() && domain.questions.is_empty() {
            report.push(Issue::exam(
                Severity::Warning,
                format!("Domain '{}' lists no lesson or question files", domain.code),
            ));
        }
    }

    report
}

/// Check every record of a catalog against the exam
pub fn validate_catalog<R: Record>(catalog: &Catalog<R>, exam: &ExamDefinition) -> ValidationReport {
    let mut report = ValidationReport::new();

    for dup in catalog.duplicates() {
        report.push(Issue {
            severity: Severity::Error,
            kind: Some(R::KIND),
            record: Some(dup.id.clone()),
            source: Some(dup.second_source.clone()),
            message: format!(
                "duplicate id (first defined in {}); lookups return the first",
                dup.first_source
            ),
        });
    }

    for (record, source) in catalog.with_origins() {
        for problem in record.lint() {
            report.push(Issue::record(Severity::Error, record, source, problem));
        }

        match exam.domain(record.domain()) {
            None => report.push(Issue::record(
                Severity::Warning,
                record,
                source,
                format!(
                    "domain '{}' is not declared by exam '{}'; excluded from statistics",
                    record.domain(),
                    exam.code
                ),
            )),
            Some(domain) => {
                if let Some(area) = record.area() {
                    if !domain.areas.is_empty() && !domain.declares_area(area) {
                        report.push(Issue::record(
                            Severity::Warning,
                            record,
                            source,
                            format!("area '{}' is not declared under domain '{}'", area, domain.code),
                        ));
                    }
                }
            }
        }
    }

    report
}

/// Check that every `relatedLessons` reference resolves
pub fn validate_related_lessons(lessons: &Catalog<Lesson>) -> ValidationReport {
    let mut report = ValidationReport::new();
    let known: HashSet<&RecordId> = lessons.iter().map(|l| &l.id).collect();

    for (lesson, source) in lessons.with_origins() {
        for related in &lesson.related_lessons {
            if !known.contains(related) {
                report.push(Issue::record(
                    Severity::Warning,
                    lesson,
                    source,
                    format!("related lesson '{}' does not exist", related),
                ));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::aggregate::TopicSource;
    use crate::catalog::collection::DuplicatePolicy;
    use crate::domain::Question;

    const EXAM_YAML: &str = r#"
code: cfp
name: CFP
domains:
  - code: CFP-GEN
    name: General Principles
    exam_weight: 60
    areas: [{ code: GEN-1 }]
    lessons: [lessons/gen.yaml]
  - code: CFP-TAX
    name: Tax Planning
    exam_weight: 30
"#;

    fn exam() -> ExamDefinition {
        ExamDefinition::from_yaml(EXAM_YAML).unwrap()
    }

    #[test]
    fn test_exam_warnings() {
        let report = validate_exam(&exam());

        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 2);
        assert!(report.issues[0].message.contains("sum to 90%"));
        assert!(report.issues[1].message.contains("CFP-TAX"));
    }

    #[test]
    fn test_unknown_domain_and_area() {
        let catalog = Catalog::from_records(vec![
            Lesson::new("G1", "CFP-GEN", "Gen", 1).with_area("GEN-1"),
            Lesson::new("G2", "CFP-GEN", "Gen", 2).with_area("GEN-7"),
            Lesson::new("X1", "CFP-XYZ", "Stray", 1),
        ])
        .unwrap();

        let report = validate_catalog(&catalog, &exam());

        assert!(!report.has_errors());
        assert_eq!(report.len(), 2);
        assert_eq!(report.issues[0].record, Some(RecordId::new("G2")));
        assert_eq!(report.issues[1].record, Some(RecordId::new("X1")));
        assert!(report.passes(false));
        assert!(!report.passes(true));
    }

    #[test]
    fn test_tolerated_duplicates_are_errors() {
        let catalog = Catalog::from_sources(
            vec![
                TopicSource::new("a.yaml", vec![Lesson::new("DUP-001", "CFP-GEN", "A", 1)]),
                TopicSource::new("b.yaml", vec![Lesson::new("DUP-001", "CFP-GEN", "B", 1)]),
            ],
            DuplicatePolicy::FirstWins,
        )
        .unwrap();

        let report = validate_catalog(&catalog, &exam());
        let errors: Vec<&Issue> = report.errors().collect();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source.as_deref(), Some("b.yaml"));
        assert!(errors[0].to_string().starts_with("[error] lesson DUP-001 (b.yaml)"));
    }

    #[test]
    fn test_question_lint_surfaces_as_error() {
        let catalog = Catalog::from_records(vec![Question::new(
            "CFP-TAX-001",
            "CFP-TAX",
            "Which is deductible?",
            ["A", "B"],
            5,
        )])
        .unwrap();

        let report = validate_catalog(&catalog, &exam());
        assert!(report.has_errors());
    }

    #[test]
    fn test_dangling_related_lesson() {
        let lessons = Catalog::from_records(vec![
            Lesson::new("G1", "CFP-GEN", "Gen", 1).with_related("G2"),
            Lesson::new("G2", "CFP-GEN", "Gen", 2).with_related("TAX-L999"),
        ])
        .unwrap();

        let report = validate_related_lessons(&lessons);

        assert_eq!(report.len(), 1);
        assert!(report.issues[0].message.contains("TAX-L999"));
    }
}
