//! Render parsed records back into bulk editor text.

use crate::flashcard::BOUNDARY;
use crate::types::{ParsedFlashcard, ParsedQuestion};

/// One `front >> back` block per card, separated by `---` lines.
pub fn render_flashcards(cards: &[ParsedFlashcard]) -> String {
    cards
        .iter()
        .map(|card| format!("{} >> {}", card.front_text, card.back_text))
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", BOUNDARY))
}

/// One `Q:` block per question, the correct option suffixed with ` <`.
pub fn render_questions(questions: &[ParsedQuestion]) -> String {
    questions
        .iter()
        .map(render_question)
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", BOUNDARY))
}

fn render_question(question: &ParsedQuestion) -> String {
    let mut lines = vec![format!("Q: {}", question.question_text)];
    for option in &question.options {
        let formatted = option.formatted();
        if formatted == question.correct_answer {
            lines.push(format!("{} <", formatted));
        } else {
            lines.push(formatted);
        }
    }
    lines.join("\n")
}
