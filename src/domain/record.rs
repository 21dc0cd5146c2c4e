//! The shared shape of catalog records.
//!
//! Lessons and questions differ in payload but are classified the same way:
//! an id, a domain, an optional blueprint area and an optional display order.
//! Query and statistics code only ever sees records through [`Record`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Record identifier (e.g. `CFP-GEN-L001`, `CISA1-001`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create an id from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Kind of record held by a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Structured lesson
    Lesson,

    /// Practice question
    Question,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Lesson => write!(f, "lesson"),
            RecordKind::Question => write!(f, "question"),
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "lesson" | "lessons" => Ok(RecordKind::Lesson),
            "question" | "questions" | "q" => Ok(RecordKind::Question),
            _ => anyhow::bail!("Unknown record kind: {}", s),
        }
    }
}

/// An immutable catalog record.
///
/// Implementors expose only classification fields; the payload stays opaque
/// to the catalog. `Send + Sync` lets a loaded catalog be shared by any
/// number of readers.
pub trait Record: std::fmt::Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Kind tag used in logs and reports
    const KIND: RecordKind;

    /// Unique identifier
    fn id(&self) -> &RecordId;

    /// Top-level classification key
    fn domain(&self) -> &str;

    /// Blueprint area nested under the domain, if the record declares one
    fn area(&self) -> Option<&str>;

    /// Display sequence within the area
    fn order(&self) -> Option<u32> {
        None
    }

    /// Short human-readable label
    fn title(&self) -> &str;

    /// Text fields searched by [`crate::catalog::Catalog::search`]
    fn search_text(&self) -> Vec<&str> {
        vec![self.title()]
    }

    /// Authoring problems detectable from the record alone
    fn lint(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.id().as_str().trim().is_empty() {
            problems.push("id is empty".to_string());
        }
        if self.title().trim().is_empty() {
            problems.push("title is empty".to_string());
        }
        problems
    }
}
