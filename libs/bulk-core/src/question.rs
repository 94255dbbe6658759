//! Bulk multiple-choice question parser.
//!
//! # Format
//! ```text
//! Q: What is 2+2?
//! a. 3
//! b. 4 <
//! c. 5
//! ---
//! Question: Which planet is largest?
//! a. Mars
//! b. Jupiter *
//! 3. Numbered questions work too
//! a: yes <
//! b: no
//! ```
//!
//! A trailing `<` (or `*`) marks the correct option. A question missing
//! text, options or a correct answer is dropped.

use crate::accumulator::{parse_with, Classified, LineGrammar};
use crate::flashcard::BOUNDARY;
use crate::types::{ParsedOption, ParsedQuestion};

/// Trailing markers that flag an option as correct.
pub const CORRECT_MARKERS: [char; 2] = ['<', '*'];

/// Parse bulk editor text into questions. Never fails; incomplete
/// questions are dropped.
pub fn parse_questions(text: &str) -> Vec<ParsedQuestion> {
    parse_with(QuestionGrammar, text)
}

/// A line inside an open question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionLine<'a> {
    /// An option line.
    Choice {
        key: char,
        text: &'a str,
        correct: bool,
    },
    /// Extra question text.
    Text(&'a str),
}

/// Grammar for the question bulk format.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionGrammar;

/// Strip a question marker (`Q:`, `Question:`, `12.`) and return the rest.
pub fn strip_question_marker(line: &str) -> Option<&str> {
    let rest = strip_prefix_ignore_case(line, "question:")
        .or_else(|| strip_prefix_ignore_case(line, "q:"))
        .or_else(|| strip_numbered(line))?;
    Some(rest.trim())
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

fn strip_numbered(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.')
}

/// Split an option line (`a. text`, `B: text`, `c text`) into key and text.
/// The text is trimmed but still carries any correct marker.
pub fn split_option(line: &str) -> Option<(char, &str)> {
    let mut chars = line.chars();
    let key = chars.next().filter(char::is_ascii_alphabetic)?;
    let rest = chars.as_str();
    let rest = rest
        .strip_prefix('.')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);

    let text = rest.trim_start();
    if text.len() == rest.len() {
        // at least one whitespace character must follow the key
        return None;
    }
    Some((key.to_ascii_lowercase(), text.trim_end()))
}

/// Remove a trailing correct marker, returning the cleaned text.
pub fn strip_correct_marker(text: &str) -> Option<&str> {
    text.strip_suffix(|c: char| CORRECT_MARKERS.contains(&c))
        .map(str::trim)
}

impl LineGrammar for QuestionGrammar {
    /// Question text after any `Q:`/`Question:`/`N.` marker.
    type Start<'a> = &'a str;
    type Line<'a> = QuestionLine<'a>;
    type Draft = ParsedQuestion;
    type Record = ParsedQuestion;

    fn classify<'a>(
        &self,
        line: &'a str,
        accumulating: bool,
    ) -> Classified<&'a str, QuestionLine<'a>> {
        let line = line.trim();
        if line.is_empty() {
            return Classified::Blank;
        }
        if line == BOUNDARY {
            return Classified::Boundary;
        }
        if let Some(rest) = strip_question_marker(line) {
            return Classified::Start(rest);
        }
        if !accumulating {
            // tolerate a question typed without a marker
            return Classified::Start(line);
        }
        if let Some((key, text)) = split_option(line) {
            let (text, correct) = match strip_correct_marker(text) {
                Some(stripped) => (stripped, true),
                None => (text, false),
            };
            return Classified::Continue(QuestionLine::Choice { key, text, correct });
        }
        Classified::Continue(QuestionLine::Text(line))
    }

    fn open(&self, start: &str) -> ParsedQuestion {
        ParsedQuestion {
            question_text: start.to_string(),
            ..ParsedQuestion::default()
        }
    }

    fn extend(&self, draft: &mut ParsedQuestion, line: QuestionLine<'_>) {
        match line {
            QuestionLine::Text(text) => {
                let joined = if draft.question_text.is_empty() {
                    text.to_string()
                } else {
                    format!("{}\n{}", draft.question_text, text)
                };
                draft.question_text = joined.trim().to_string();
            }
            QuestionLine::Choice { key, text, correct } => {
                let option = ParsedOption::new(key, text);
                if correct {
                    draft.correct_answer = option.formatted();
                }
                draft.options.push(option);
            }
        }
    }

    fn finish(&self, draft: ParsedQuestion) -> Option<ParsedQuestion> {
        // an answer shared by two identical options names neither
        (draft.is_complete() && draft.correct_index().is_some()).then_some(draft)
    }
}
