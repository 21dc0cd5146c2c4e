//! Practice question records.

use serde::{Deserialize, Serialize};

use super::record::{Record, RecordId, RecordKind};

/// Question difficulty. Lesson-style labels are accepted and normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionDifficulty {
    #[serde(alias = "beginner")]
    Easy,
    #[default]
    #[serde(alias = "intermediate")]
    Medium,
    #[serde(alias = "advanced")]
    Hard,
}

impl QuestionDifficulty {
    pub const ALL: [QuestionDifficulty; 3] = [
        QuestionDifficulty::Easy,
        QuestionDifficulty::Medium,
        QuestionDifficulty::Hard,
    ];
}

impl std::fmt::Display for QuestionDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionDifficulty::Easy => write!(f, "easy"),
            QuestionDifficulty::Medium => write!(f, "medium"),
            QuestionDifficulty::Hard => write!(f, "hard"),
        }
    }
}

/// A multiple-choice practice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique question identifier
    pub id: RecordId,

    #[serde(default)]
    pub course_id: Option<String>,

    /// Domain code (e.g. "CFP-TAX")
    #[serde(alias = "domain")]
    pub section: String,

    /// Blueprint area (e.g. "TAX-1")
    #[serde(default)]
    pub blueprint_area: Option<String>,

    /// Human-readable topic name
    #[serde(default)]
    pub topic: String,

    #[serde(default)]
    pub subtopic: Option<String>,

    #[serde(default)]
    pub difficulty: QuestionDifficulty,

    #[serde(default)]
    pub skill_level: Option<String>,

    /// Question stem
    pub question: String,

    pub options: Vec<String>,

    /// Index into `options`
    pub correct_answer: usize,

    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// Create a question with the given stem and options
    pub fn new(
        id: impl Into<RecordId>,
        section: impl Into<String>,
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: usize,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: None,
            section: section.into(),
            blueprint_area: None,
            topic: String::new(),
            subtopic: None,
            difficulty: QuestionDifficulty::default(),
            skill_level: None,
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer,
            explanation: String::new(),
        }
    }

    /// Set the blueprint area
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.blueprint_area = Some(area.into());
        self
    }

    /// Set the topic name
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// The option marked correct, if the index is in range
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

impl Record for Question {
    const KIND: RecordKind = RecordKind::Question;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn domain(&self) -> &str {
        &self.section
    }

    fn area(&self) -> Option<&str> {
        self.blueprint_area.as_deref()
    }

    fn title(&self) -> &str {
        if self.topic.is_empty() {
            &self.question
        } else {
            &self.topic
        }
    }

    fn search_text(&self) -> Vec<&str> {
        let mut text = vec![self.topic.as_str(), self.question.as_str()];
        if let Some(subtopic) = &self.subtopic {
            text.push(subtopic);
        }
        text
    }

    fn lint(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.id.as_str().trim().is_empty() {
            problems.push("id is empty".to_string());
        }
        if self.question.trim().is_empty() {
            problems.push("question text is empty".to_string());
        }
        if self.options.len() < 2 {
            problems.push(format!("needs at least 2 options, has {}", self.options.len()));
        }
        if self.correct_answer >= self.options.len() {
            problems.push(format!(
                "correctAnswer {} is out of range for {} options",
                self.correct_answer,
                self.options.len()
            ));
        }
        problems
    }
}
