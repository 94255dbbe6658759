//! Content store collaborator: CRUD over notes, flashcards and questions.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::catalog::unit_matches;
use crate::error::{AdminError, Result};
use crate::models::{Flashcard, NewFlashcard, NewNote, NewQuestion, Note, Question};

/// Filter used by the list screens. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub unit: Option<String>,
}

impl QueryFilter {
    pub fn subject(subject: &str) -> Self {
        Self {
            subject: Some(subject.to_string()),
            ..Self::default()
        }
    }

    pub fn with_grade(mut self, grade: &str) -> Self {
        self.grade = Some(grade.to_string()).filter(|g| !g.is_empty());
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string()).filter(|u| !u.is_empty());
        self
    }

    fn matches(&self, subject: Option<&str>, grade: Option<&str>, unit: Option<&str>) -> bool {
        let unit_ok = match &self.unit {
            Some(wanted) => unit.is_some_and(|u| unit_matches(wanted, u)),
            None => true,
        };
        field_matches(self.subject.as_deref(), subject)
            && field_matches(self.grade.as_deref(), grade)
            && unit_ok
    }
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    wanted.map_or(true, |wanted| actual == Some(wanted))
}

/// Request/response interface to wherever content is persisted.
pub trait ContentStore: Send + Sync {
    fn insert_notes(&self, notes: Vec<NewNote>) -> Result<Vec<Note>>;
    fn get_note(&self, id: Uuid) -> Result<Option<Note>>;
    fn update_note(&self, note: &Note) -> Result<()>;
    fn delete_note(&self, id: Uuid) -> Result<()>;
    fn query_notes(&self, filter: &QueryFilter) -> Result<Vec<Note>>;

    fn insert_flashcards(&self, cards: Vec<NewFlashcard>) -> Result<Vec<Flashcard>>;
    fn get_flashcard(&self, id: Uuid) -> Result<Option<Flashcard>>;
    fn update_flashcard(&self, card: &Flashcard) -> Result<()>;
    fn delete_flashcard(&self, id: Uuid) -> Result<()>;
    fn query_flashcards(&self, filter: &QueryFilter) -> Result<Vec<Flashcard>>;

    fn insert_questions(&self, questions: Vec<NewQuestion>) -> Result<Vec<Question>>;
    fn get_question(&self, id: Uuid) -> Result<Option<Question>>;
    fn update_question(&self, question: &Question) -> Result<()>;
    fn delete_question(&self, id: Uuid) -> Result<()>;
    fn query_questions(&self, filter: &QueryFilter) -> Result<Vec<Question>>;
}

#[derive(Debug, Default)]
struct Tables {
    notes: HashMap<Uuid, Note>,
    flashcards: HashMap<Uuid, Flashcard>,
    questions: HashMap<Uuid, Question>,
}

/// Content store held in memory. Queries return newest first.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn update_row<T: Clone>(rows: &mut HashMap<Uuid, T>, id: Uuid, row: &T) -> Result<()> {
    match rows.get_mut(&id) {
        Some(existing) => {
            *existing = row.clone();
            Ok(())
        }
        None => Err(AdminError::NotFound(id)),
    }
}

fn delete_row<T>(rows: &mut HashMap<Uuid, T>, id: Uuid) -> Result<()> {
    rows.remove(&id).map(|_| ()).ok_or(AdminError::NotFound(id))
}

impl ContentStore for InMemoryStore {
    fn insert_notes(&self, notes: Vec<NewNote>) -> Result<Vec<Note>> {
        let mut tables = self.tables.lock().expect("store lock");
        let created: Vec<Note> = notes.into_iter().map(Note::create).collect();
        for note in &created {
            tables.notes.insert(note.id, note.clone());
        }
        tracing::debug!("Inserted {} notes", created.len());
        Ok(created)
    }

    fn get_note(&self, id: Uuid) -> Result<Option<Note>> {
        Ok(self.tables.lock().expect("store lock").notes.get(&id).cloned())
    }

    fn update_note(&self, note: &Note) -> Result<()> {
        update_row(&mut self.tables.lock().expect("store lock").notes, note.id, note)
    }

    fn delete_note(&self, id: Uuid) -> Result<()> {
        delete_row(&mut self.tables.lock().expect("store lock").notes, id)
    }

    fn query_notes(&self, filter: &QueryFilter) -> Result<Vec<Note>> {
        let tables = self.tables.lock().expect("store lock");
        let mut notes: Vec<Note> = tables
            .notes
            .values()
            .filter(|n| filter.matches(n.subject.as_deref(), n.grade.as_deref(), n.unit.as_deref()))
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    fn insert_flashcards(&self, cards: Vec<NewFlashcard>) -> Result<Vec<Flashcard>> {
        let mut tables = self.tables.lock().expect("store lock");
        let created: Vec<Flashcard> = cards.into_iter().map(Flashcard::create).collect();
        for card in &created {
            tables.flashcards.insert(card.id, card.clone());
        }
        tracing::debug!("Inserted {} flashcards", created.len());
        Ok(created)
    }

    fn get_flashcard(&self, id: Uuid) -> Result<Option<Flashcard>> {
        Ok(self
            .tables
            .lock()
            .expect("store lock")
            .flashcards
            .get(&id)
            .cloned())
    }

    fn update_flashcard(&self, card: &Flashcard) -> Result<()> {
        update_row(&mut self.tables.lock().expect("store lock").flashcards, card.id, card)
    }

    fn delete_flashcard(&self, id: Uuid) -> Result<()> {
        delete_row(&mut self.tables.lock().expect("store lock").flashcards, id)
    }

    fn query_flashcards(&self, filter: &QueryFilter) -> Result<Vec<Flashcard>> {
        let tables = self.tables.lock().expect("store lock");
        let mut cards: Vec<Flashcard> = tables
            .flashcards
            .values()
            .filter(|c| filter.matches(c.subject.as_deref(), c.grade.as_deref(), c.unit.as_deref()))
            .cloned()
            .collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cards)
    }

    fn insert_questions(&self, questions: Vec<NewQuestion>) -> Result<Vec<Question>> {
        let mut tables = self.tables.lock().expect("store lock");
        let created: Vec<Question> = questions.into_iter().map(Question::create).collect();
        for question in &created {
            tables.questions.insert(question.id, question.clone());
        }
        tracing::debug!("Inserted {} questions", created.len());
        Ok(created)
    }

    fn get_question(&self, id: Uuid) -> Result<Option<Question>> {
        Ok(self
            .tables
            .lock()
            .expect("store lock")
            .questions
            .get(&id)
            .cloned())
    }

    fn update_question(&self, question: &Question) -> Result<()> {
        update_row(
            &mut self.tables.lock().expect("store lock").questions,
            question.id,
            question,
        )
    }

    fn delete_question(&self, id: Uuid) -> Result<()> {
        delete_row(&mut self.tables.lock().expect("store lock").questions, id)
    }

    fn query_questions(&self, filter: &QueryFilter) -> Result<Vec<Question>> {
        let tables = self.tables.lock().expect("store lock");
        let mut questions: Vec<Question> = tables
            .questions
            .values()
            .filter(|q| filter.matches(q.subject.as_deref(), q.grade.as_deref(), q.unit.as_deref()))
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(questions)
    }
}
