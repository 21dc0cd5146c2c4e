//! Kind-specific queries and whole-catalog summaries.
//!
//! Questions are also looked up by topic and difficulty; lesson catalogs
//! report their total study time.

use serde::Serialize;

use super::collection::Catalog;
use crate::domain::{Lesson, Question, QuestionDifficulty, Record};

impl Catalog<Question> {
    /// Questions with this topic (exact match), in collection order
    pub fn by_topic(&self, topic: &str) -> Vec<&Question> {
        self.filter(|q| q.topic == topic)
    }

    /// Questions at this difficulty, in collection order
    pub fn by_difficulty(&self, difficulty: QuestionDifficulty) -> Vec<&Question> {
        self.filter(|q| q.difficulty == difficulty)
    }

    /// Distinct non-empty topics in order of first appearance
    pub fn topics(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for question in self {
            let topic = question.topic.as_str();
            if !topic.is_empty() && !seen.contains(&topic) {
                seen.push(topic);
            }
        }
        seen
    }
}

impl Catalog<Lesson> {
    /// Sum of lesson durations in minutes
    pub fn total_minutes(&self) -> u64 {
        self.iter().map(|l| u64::from(l.duration)).sum()
    }
}

/// Question counts per difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultyCounts {
    pub fn get(&self, difficulty: QuestionDifficulty) -> usize {
        match difficulty {
            QuestionDifficulty::Easy => self.easy,
            QuestionDifficulty::Medium => self.medium,
            QuestionDifficulty::Hard => self.hard,
        }
    }
}

/// Summary of a lesson catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LessonSummary {
    pub total_minutes: u64,

    /// Total minutes rounded to the nearest hour
    pub total_hours: u64,

    /// Lessons that need a financial calculator
    pub tvm_required: usize,
}

/// Summary of a question catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuestionSummary {
    pub by_difficulty: DifficultyCounts,

    /// Number of distinct non-empty topics
    pub topics: usize,
}

/// Whole-catalog summary, shaped by record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Lessons(LessonSummary),
    Questions(QuestionSummary),
}

/// Records that can summarize a catalog of themselves
pub trait Summarize: Record {
    fn summarize(catalog: &Catalog<Self>) -> Summary;
}

impl Summarize for Lesson {
    fn summarize(catalog: &Catalog<Self>) -> Summary {
        let total_minutes = catalog.total_minutes();

        Summary::Lessons(LessonSummary {
            total_minutes,
            total_hours: (total_minutes + 30) / 60,
            tvm_required: catalog.filter(|l| l.tvm_required).len(),
        })
    }
}

impl Summarize for Question {
    fn summarize(catalog: &Catalog<Self>) -> Summary {
        // Counts come from the same queries callers use
        let by_difficulty = DifficultyCounts {
            easy: catalog.by_difficulty(QuestionDifficulty::Easy).len(),
            medium: catalog.by_difficulty(QuestionDifficulty::Medium).len(),
            hard: catalog.by_difficulty(QuestionDifficulty::Hard).len(),
        };

        Summary::Questions(QuestionSummary {
            by_difficulty,
            topics: catalog.topics().len(),
        })
    }
}
