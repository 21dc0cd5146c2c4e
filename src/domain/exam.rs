//! Exam definitions: the static metadata a content pack declares.
//!
//! Domain names, exam weights and area codes are configuration, not derived
//! from the records. The order of `domains` is the aggregation order.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::record::RecordKind;

/// An exam and its ordered domains, as read from `pack.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamDefinition {
    /// Exam code (e.g. "cfp")
    pub code: String,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Domains in blueprint order
    pub domains: Vec<DomainDefinition>,
}

impl ExamDefinition {
    /// Parse an exam definition from YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse pack manifest YAML")
    }

    /// Check structural well-formedness
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            anyhow::bail!("Exam code cannot be empty");
        }

        if self.domains.is_empty() {
            anyhow::bail!("Exam '{}' must declare at least one domain", self.code);
        }

        for (i, domain) in self.domains.iter().enumerate() {
            if domain.code.trim().is_empty() {
                anyhow::bail!("Domain {} of exam '{}' has an empty code", i, self.code);
            }

            if self.domains[..i].iter().any(|d| d.code == domain.code) {
                anyhow::bail!(
                    "Exam '{}' declares domain '{}' more than once",
                    self.code,
                    domain.code
                );
            }

            if let ExamWeight::Range(min, max) = domain.exam_weight {
                if min > max {
                    anyhow::bail!(
                        "Domain '{}' has an inverted weight range {}-{}",
                        domain.code,
                        min,
                        max
                    );
                }
            }
        }

        Ok(())
    }

    /// Get a domain by code
    pub fn domain(&self, code: &str) -> Option<&DomainDefinition> {
        self.domains.iter().find(|d| d.code == code)
    }

    /// Whether records with this domain code count toward statistics
    pub fn is_known_domain(&self, code: &str) -> bool {
        self.domain(code).is_some()
    }

    /// Domain codes in blueprint order
    pub fn domain_codes(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(|d| d.code.as_str())
    }

    /// Exam weight of a domain, rendered for display (e.g. "15%")
    pub fn domain_weight(&self, code: &str) -> Option<String> {
        self.domain(code).map(|d| d.exam_weight.to_string())
    }

    /// Sum of fixed domain weights, or `None` when any domain uses a range
    pub fn fixed_weight_total(&self) -> Option<u32> {
        self.domains.iter().try_fold(0u32, |acc, d| match d.exam_weight {
            ExamWeight::Fixed(w) => Some(acc + u32::from(w)),
            ExamWeight::Range(..) => None,
        })
    }
}

/// One blueprint domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainDefinition {
    /// Domain code matched against each record's domain field
    pub code: String,

    /// Display name
    pub name: String,

    /// Share of the exam
    pub exam_weight: ExamWeight,

    /// Blueprint areas in this domain
    #[serde(default)]
    pub areas: Vec<AreaDefinition>,

    /// Lesson topic files or glob patterns, relative to the pack directory
    #[serde(default)]
    pub lessons: Vec<String>,

    /// Question topic files or glob patterns, relative to the pack directory
    #[serde(default)]
    pub questions: Vec<String>,
}

impl DomainDefinition {
    /// Area codes in declared order
    pub fn area_codes(&self) -> Vec<String> {
        self.areas.iter().map(|a| a.code.clone()).collect()
    }

    /// Whether the domain declares this area
    pub fn declares_area(&self, code: &str) -> bool {
        self.areas.iter().any(|a| a.code == code)
    }

    /// Topic file patterns for one record kind
    pub fn topic_patterns(&self, kind: RecordKind) -> &[String] {
        match kind {
            RecordKind::Lesson => &self.lessons,
            RecordKind::Question => &self.questions,
        }
    }
}

/// A blueprint area within a domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDefinition {
    pub code: String,

    #[serde(default)]
    pub name: String,

    /// Share of the domain, as published (e.g. "20%")
    #[serde(default)]
    pub weight: Option<String>,
}

/// Exam weight of a domain: a fixed percentage or a published range.
///
/// YAML accepts `15` or `[25, 35]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExamWeight {
    Fixed(u8),
    Range(u8, u8),
}

impl std::fmt::Display for ExamWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamWeight::Fixed(w) => write!(f, "{}%", w),
            ExamWeight::Range(min, max) => write!(f, "{}-{}%", min, max),
        }
    }
}
