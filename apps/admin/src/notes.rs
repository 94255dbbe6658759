//! Note create/edit screen.

use bulk_core::Document;
use uuid::Uuid;

use crate::auth::IdentityProvider;
use crate::catalog::MAX_NOTE_LENGTH;
use crate::error::{AdminError, Result};
use crate::models::{NewNote, Note, RecordMeta};
use crate::store::ContentStore;

const INCOMPLETE_MESSAGE: &str = "Title, content, and grade cannot be empty.";

/// A note being written. `content` is the editor markup.
#[derive(Debug, Clone, Default)]
pub struct NoteEdit {
    record: Option<Note>,
    pub title: String,
    pub content: String,
    pub grade: String,
    pub unit: String,
    pub is_premium: bool,
}

impl NoteEdit {
    /// Blank note for the "new note" screen.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &dyn ContentStore, id: Uuid) -> Result<Self> {
        let record = store.get_note(id)?.ok_or(AdminError::NotFound(id))?;
        Ok(Self {
            title: record.title.clone(),
            content: record.content.clone(),
            grade: record.grade.clone().unwrap_or_default(),
            unit: record.unit.clone().unwrap_or_default(),
            is_premium: record.is_premium,
            record: Some(record),
        })
    }

    pub fn is_new(&self) -> bool {
        self.record.is_none()
    }

    /// Characters of text in the content, ignoring markup.
    pub fn content_length(&self) -> usize {
        Document::from_markup(&self.content).char_count()
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty()
            || self.content_length() == 0
            || self.grade.trim().is_empty()
        {
            return Err(AdminError::Validation(INCOMPLETE_MESSAGE.to_string()));
        }
        let length = self.content_length();
        if length > MAX_NOTE_LENGTH {
            return Err(AdminError::Validation(format!(
                "Note is {} characters long; the limit is {}.",
                length, MAX_NOTE_LENGTH
            )));
        }
        Ok(())
    }

    /// Insert a new note under the logged-in subject, or write back an
    /// existing one.
    pub fn save(&mut self, store: &dyn ContentStore, identity: &dyn IdentityProvider) -> Result<Note> {
        let subject = identity.require_subject()?;
        self.validate()?;

        let saved = match &self.record {
            Some(record) => {
                let updated = Note {
                    title: self.title.clone(),
                    content: self.content.clone(),
                    grade: Some(self.grade.clone()),
                    unit: Some(self.unit.clone()).filter(|u| !u.is_empty()),
                    is_premium: self.is_premium,
                    ..record.clone()
                };
                store.update_note(&updated)?;
                tracing::info!("Updated note {}", updated.id);
                updated
            }
            None => {
                let new = NewNote {
                    title: self.title.clone(),
                    content: self.content.clone(),
                    meta: RecordMeta {
                        subject: subject.to_string(),
                        grade: self.grade.clone(),
                        unit: self.unit.clone(),
                        is_premium: self.is_premium,
                    },
                };
                let mut created = store.insert_notes(vec![new])?;
                let note = created
                    .pop()
                    .ok_or_else(|| AdminError::Validation("note was not stored".to_string()))?;
                tracing::info!("Created note {} for {}", note.id, subject);
                note
            }
        };
        self.record = Some(saved.clone());
        Ok(saved)
    }
}
