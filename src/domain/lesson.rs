//! Lesson records.

use serde::{Deserialize, Serialize};

use super::record::{Record, RecordId, RecordKind};

/// Lesson difficulty as authored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonDifficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// A structured lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Unique lesson identifier
    pub id: RecordId,

    /// Owning course (e.g. "cfp")
    #[serde(default)]
    pub course_id: Option<String>,

    /// Domain code (e.g. "CFP-GEN")
    #[serde(alias = "domain")]
    pub section: String,

    /// Blueprint area (e.g. "GEN-1")
    #[serde(default)]
    pub blueprint_area: Option<String>,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Display sequence within the area
    pub order: u32,

    /// Estimated duration in minutes
    #[serde(default)]
    pub duration: u32,

    #[serde(default)]
    pub difficulty: LessonDifficulty,

    #[serde(default)]
    pub topics: Vec<String>,

    /// Needs a financial calculator (time value of money)
    #[serde(default)]
    pub tvm_required: bool,

    /// Ids of lessons worth reading alongside this one
    #[serde(default)]
    pub related_lessons: Vec<RecordId>,

    #[serde(default)]
    pub key_formulas: Vec<String>,

    #[serde(default)]
    pub mnemonics: Vec<String>,

    /// Lesson body (sections, quiz); never inspected by the catalog
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Lesson {
    /// Create a lesson with empty payload
    pub fn new(
        id: impl Into<RecordId>,
        section: impl Into<String>,
        title: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: None,
            section: section.into(),
            blueprint_area: None,
            title: title.into(),
            description: String::new(),
            order,
            duration: 0,
            difficulty: LessonDifficulty::default(),
            topics: Vec::new(),
            tvm_required: false,
            related_lessons: Vec::new(),
            key_formulas: Vec::new(),
            mnemonics: Vec::new(),
            content: serde_json::Value::Null,
        }
    }

    /// Set the blueprint area
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.blueprint_area = Some(area.into());
        self
    }

    /// Add topics
    pub fn with_topics(mut self, topics: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.topics.extend(topics.into_iter().map(Into::into));
        self
    }

    /// Add a related lesson reference
    pub fn with_related(mut self, id: impl Into<RecordId>) -> Self {
        self.related_lessons.push(id.into());
        self
    }

    /// Mark as requiring a financial calculator
    pub fn with_tvm(mut self) -> Self {
        self.tvm_required = true;
        self
    }
}

impl Record for Lesson {
    const KIND: RecordKind = RecordKind::Lesson;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn domain(&self) -> &str {
        &self.section
    }

    fn area(&self) -> Option<&str> {
        self.blueprint_area.as_deref()
    }

    fn order(&self) -> Option<u32> {
        Some(self.order)
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.title.as_str(), self.description.as_str()];
        text.extend(self.topics.iter().map(String::as_str));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON_YAML: &str = r#"
id: CFP-GEN-L001
courseId: cfp
section: CFP-GEN
blueprintArea: GEN-1
title: The 7-Step Financial Planning Process
order: 1
duration: 45
difficulty: intermediate
topics: [Financial Planning Process, Practice Standards]
content:
  sections:
    - title: Why This Matters
      type: callout
"#;

    #[test]
    fn test_lesson_parsing() {
        let lesson: Lesson = serde_yaml::from_str(LESSON_YAML).unwrap();

        assert_eq!(lesson.id, RecordId::new("CFP-GEN-L001"));
        assert_eq!(lesson.domain(), "CFP-GEN");
        assert_eq!(lesson.area(), Some("GEN-1"));
        assert_eq!(lesson.order(), Some(1));
        assert!(!lesson.tvm_required);
        assert!(lesson.content.get("sections").is_some());
    }

    #[test]
    fn test_lesson_domain_alias_and_missing_area() {
        let json = r#"{"id":"far-001","domain":"FAR","title":"Conceptual Framework","order":1}"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();

        assert_eq!(lesson.domain(), "FAR");
        assert_eq!(lesson.area(), None);
        assert_eq!(lesson.difficulty, LessonDifficulty::Intermediate);
    }

    #[test]
    fn test_lesson_search_text_includes_topics() {
        let lesson: Lesson = serde_yaml::from_str(LESSON_YAML).unwrap();
        assert!(lesson.search_text().contains(&"Practice Standards"));
    }
}
