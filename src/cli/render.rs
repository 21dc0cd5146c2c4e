//! Plain-text rendering for CLI output.

use crate::catalog::Summary;
use crate::domain::{Lesson, Question, QuestionDifficulty, Record};

/// Shorten to `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Print records as an id/domain/area/title table
pub fn print_table<R: Record>(records: &[&R]) {
    println!("{:<16} {:<10} {:<10} {:>5}  {:<45}", "ID", "DOMAIN", "AREA", "ORDER", "TITLE");
    println!("{}", "-".repeat(92));

    for record in records {
        let order = record
            .order()
            .map(|o| o.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<16} {:<10} {:<10} {:>5}  {:<45}",
            record.id().as_str(),
            record.domain(),
            record.area().unwrap_or("-"),
            order,
            truncate(record.title(), 45)
        );
    }
}

pub fn print_lesson(lesson: &Lesson, source: Option<&str>) {
    println!("Lesson {}", lesson.id);
    println!("  Title:      {}", lesson.title);
    println!("  Domain:     {}", lesson.section);
    println!("  Area:       {}", lesson.blueprint_area.as_deref().unwrap_or("-"));
    println!("  Order:      {}", lesson.order);
    println!("  Duration:   {} min", lesson.duration);
    println!("  Difficulty: {:?}", lesson.difficulty);
    if !lesson.topics.is_empty() {
        println!("  Topics:     {}", lesson.topics.join(", "));
    }
    if lesson.tvm_required {
        println!("  Requires a financial calculator");
    }
    if !lesson.related_lessons.is_empty() {
        let related: Vec<String> = lesson.related_lessons.iter().map(|r| r.to_string()).collect();
        println!("  Related:    {}", related.join(", "));
    }
    if let Some(source) = source {
        println!("  Source:     {}", source);
    }
    if !lesson.description.is_empty() {
        println!("\n{}", lesson.description);
    }
    for formula in &lesson.key_formulas {
        println!("  = {}", formula);
    }
    for mnemonic in &lesson.mnemonics {
        println!("  * {}", mnemonic);
    }
}

pub fn print_question(question: &Question, source: Option<&str>) {
    println!("Question {}", question.id);
    println!("  Domain:     {}", question.section);
    println!("  Area:       {}", question.blueprint_area.as_deref().unwrap_or("-"));
    if !question.topic.is_empty() {
        println!("  Topic:      {}", question.topic);
    }
    println!("  Difficulty: {:?}", question.difficulty);
    if let Some(source) = source {
        println!("  Source:     {}", source);
    }

    println!("\n{}\n", question.question);
    for (i, option) in question.options.iter().enumerate() {
        let marker = if i == question.correct_answer { "*" } else { " " };
        println!(" {} {}", marker, option);
    }

    if !question.explanation.is_empty() {
        println!("\n{}", question.explanation);
    }
}

pub fn print_summary(summary: &Summary) {
    match summary {
        Summary::Lessons(lessons) => {
            println!(
                "Study time: {} min (~{} h), {} need a calculator",
                lessons.total_minutes, lessons.total_hours, lessons.tvm_required
            );
        }
        Summary::Questions(questions) => {
            let counts: Vec<String> = QuestionDifficulty::ALL
                .iter()
                .map(|d| format!("{} {}", questions.by_difficulty.get(*d), d))
                .collect();
            println!("Difficulty: {}", counts.join(", "));
            println!("Topics: {}", questions.topics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Tax Planning", 45), "Tax Planning");
        assert_eq!(truncate("Retirement Savings and Income", 13), "Retirement...");
        // Multi-byte characters are not split
        assert_eq!(truncate("CFP® Practice Standards", 7), "CFP®...");
    }
}
