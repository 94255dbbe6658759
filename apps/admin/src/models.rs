//! Content records as held by the content store.

use bulk_core::{option_key, ParsedFlashcard, ParsedOption, ParsedQuestion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields the host adds to every parsed record before saving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub subject: String,
    pub grade: String,
    pub unit: String,
    pub is_premium: bool,
}

// === Stored records ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub unit: Option<String>,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub front_text: String,
    pub back_text: String,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub unit: Option<String>,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

/// Stored question; options are kept in their formatted `"a. text"` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Editable form of a stored question. Option strings without a
    /// leading letter are re-keyed by position.
    pub fn to_parsed(&self) -> ParsedQuestion {
        let options = self
            .options
            .iter()
            .enumerate()
            .map(|(idx, stored)| {
                ParsedOption::from_stored(stored).unwrap_or_else(|| {
                    ParsedOption::new(option_key(idx).unwrap_or('z'), stored.trim())
                })
            })
            .collect();

        ParsedQuestion {
            question_text: self.question_text.clone(),
            options,
            correct_answer: self.correct_answer.clone(),
        }
    }
}

// === Insert payloads ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub meta: RecordMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlashcard {
    pub front_text: String,
    pub back_text: String,
    pub meta: RecordMeta,
}

impl NewFlashcard {
    pub fn from_parsed(card: ParsedFlashcard, meta: &RecordMeta) -> Self {
        Self {
            front_text: card.front_text,
            back_text: card.back_text,
            meta: meta.clone(),
        }
    }
}

/// Questions carry no premium flag; `meta.is_premium` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub meta: RecordMeta,
}

impl NewQuestion {
    pub fn from_parsed(question: ParsedQuestion, meta: &RecordMeta) -> Self {
        Self {
            options: question.stored_options(),
            question_text: question.question_text,
            correct_answer: question.correct_answer,
            meta: meta.clone(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl Note {
    pub fn create(new: NewNote) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            grade: non_empty(&new.meta.grade),
            subject: non_empty(&new.meta.subject),
            unit: non_empty(&new.meta.unit),
            is_premium: new.meta.is_premium,
            created_at: Utc::now(),
        }
    }
}

impl Flashcard {
    pub fn create(new: NewFlashcard) -> Self {
        Self {
            id: Uuid::new_v4(),
            front_text: new.front_text,
            back_text: new.back_text,
            grade: non_empty(&new.meta.grade),
            subject: non_empty(&new.meta.subject),
            unit: non_empty(&new.meta.unit),
            is_premium: new.meta.is_premium,
            created_at: Utc::now(),
        }
    }
}

impl Question {
    pub fn create(new: NewQuestion) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_text: new.question_text,
            options: new.options,
            correct_answer: new.correct_answer,
            grade: non_empty(&new.meta.grade),
            subject: non_empty(&new.meta.subject),
            unit: non_empty(&new.meta.unit),
            created_at: Utc::now(),
        }
    }
}
