//! Question forms: editing one stored question, and entering new ones by
//! hand.

use bulk_core::{ParsedQuestion, Questions};
use uuid::Uuid;

use crate::auth::IdentityProvider;
use crate::catalog::{MAX_OPTIONS, MIN_OPTIONS};
use crate::error::{AdminError, Result};
use crate::import::ImportKind;
use crate::models::{Question, RecordMeta};
use crate::store::ContentStore;

const INCOMPLETE_MESSAGE: &str =
    "Please ensure question text, options, correct answer, and grade are not empty.";

/// A stored question opened for editing.
#[derive(Debug, Clone)]
pub struct QuestionEdit {
    record: Question,
    pub question: ParsedQuestion,
    pub grade: String,
    pub unit: String,
}

impl QuestionEdit {
    pub fn load(store: &dyn ContentStore, id: Uuid) -> Result<Self> {
        let record = store.get_question(id)?.ok_or(AdminError::NotFound(id))?;
        Ok(Self {
            question: record.to_parsed(),
            grade: record.grade.clone().unwrap_or_default(),
            unit: record.unit.clone().unwrap_or_default(),
            record,
        })
    }

    pub fn id(&self) -> Uuid {
        self.record.id
    }

    pub fn set_question_text(&mut self, text: impl Into<String>) {
        self.question.question_text = text.into();
    }

    pub fn add_option(&mut self) -> Result<()> {
        add_bounded_option(&mut self.question)
    }

    pub fn remove_option(&mut self, index: usize) -> Result<()> {
        remove_bounded_option(&mut self.question, index)
    }

    pub fn update_option_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        Ok(self.question.update_option_text(index, text)?)
    }

    pub fn set_correct(&mut self, index: usize) -> Result<()> {
        Ok(self.question.set_correct(index)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.question.is_complete() || self.grade.trim().is_empty() {
            return Err(AdminError::Validation(INCOMPLETE_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Validate and write the edited question back.
    pub fn save(&self, store: &dyn ContentStore) -> Result<Question> {
        self.validate()?;
        let updated = Question {
            question_text: self.question.question_text.clone(),
            options: self.question.stored_options(),
            correct_answer: self.question.correct_answer.clone(),
            grade: Some(self.grade.clone()),
            unit: Some(self.unit.clone()).filter(|u| !u.is_empty()),
            ..self.record.clone()
        };
        store.update_question(&updated)?;
        tracing::info!("Updated question {}", updated.id);
        Ok(updated)
    }
}

fn add_bounded_option(question: &mut ParsedQuestion) -> Result<()> {
    if question.options.len() >= MAX_OPTIONS {
        return Err(AdminError::Validation(format!(
            "A question can have at most {} options.",
            MAX_OPTIONS
        )));
    }
    question.add_option("")?;
    Ok(())
}

fn remove_bounded_option(question: &mut ParsedQuestion, index: usize) -> Result<()> {
    if question.options.len() <= MIN_OPTIONS {
        return Err(AdminError::Validation(format!(
            "A question needs at least {} options.",
            MIN_OPTIONS
        )));
    }
    question.remove_option(index)?;
    Ok(())
}

/// Manual entry of new questions, one form per question. Every form starts
/// with two blank options.
#[derive(Debug, Clone)]
pub struct QuestionEntry {
    questions: Vec<ParsedQuestion>,
    pub grade: String,
    pub unit: String,
}

impl Default for QuestionEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionEntry {
    pub fn new() -> Self {
        Self {
            questions: vec![ParsedQuestion::new_blank()],
            grade: String::new(),
            unit: String::new(),
        }
    }

    pub fn questions(&self) -> &[ParsedQuestion] {
        &self.questions
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut ParsedQuestion> {
        let len = self.questions.len();
        self.questions
            .get_mut(index)
            .ok_or_else(|| AdminError::Validation(format!("No question {} of {}.", index, len)))
    }

    /// Append a blank form and return its index.
    pub fn add_question(&mut self) -> usize {
        self.questions.push(ParsedQuestion::new_blank());
        self.questions.len() - 1
    }

    /// Remove a form; the last one is never removed.
    pub fn remove_question(&mut self, index: usize) -> Result<()> {
        self.question_mut(index)?;
        if self.questions.len() > 1 {
            self.questions.remove(index);
        }
        Ok(())
    }

    pub fn set_question_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.question_mut(index)?.question_text = text.into();
        Ok(())
    }

    pub fn add_option(&mut self, index: usize) -> Result<()> {
        add_bounded_option(self.question_mut(index)?)
    }

    pub fn remove_option(&mut self, index: usize, option: usize) -> Result<()> {
        remove_bounded_option(self.question_mut(index)?, option)
    }

    pub fn update_option_text(
        &mut self,
        index: usize,
        option: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        Ok(self.question_mut(index)?.update_option_text(option, text)?)
    }

    pub fn set_correct(&mut self, index: usize, option: usize) -> Result<()> {
        Ok(self.question_mut(index)?.set_correct(option)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grade.trim().is_empty() || !self.questions.iter().all(ParsedQuestion::is_complete) {
            return Err(AdminError::Validation(
                <Questions as ImportKind>::INCOMPLETE_MESSAGE.to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and insert every form under the logged-in subject.
    pub fn save(&self, store: &dyn ContentStore, identity: &dyn IdentityProvider) -> Result<usize> {
        let subject = identity.require_subject()?;
        self.validate()?;
        let meta = RecordMeta {
            subject: subject.to_string(),
            grade: self.grade.clone(),
            unit: self.unit.clone(),
            is_premium: false,
        };
        let count = Questions::insert(store, self.questions.clone(), &meta)?;
        tracing::info!("Saved {} questions for {} ({})", count, subject, meta.grade);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewQuestion, RecordMeta};
    use crate::store::InMemoryStore;
    use bulk_core::ParsedOption;

    fn stored(store: &InMemoryStore) -> Uuid {
        let created = store
            .insert_questions(vec![NewQuestion {
                question_text: "Pick".to_string(),
                options: vec!["a. X".to_string(), "b. Y".to_string(), "c. Z".to_string()],
                correct_answer: "b. Y".to_string(),
                meta: RecordMeta {
                    subject: "Math".to_string(),
                    grade: "Grade 9".to_string(),
                    unit: String::new(),
                    is_premium: false,
                },
            }])
            .unwrap();
        created[0].id
    }

    #[test]
    fn test_remove_first_option_clears_answer_and_blocks_save() {
        let store = InMemoryStore::new();
        let mut edit = QuestionEdit::load(&store, stored(&store)).unwrap();

        edit.remove_option(0).unwrap();
        assert_eq!(
            edit.question.options,
            vec![ParsedOption::new('a', "Y"), ParsedOption::new('b', "Z")]
        );
        assert_eq!(edit.question.correct_answer, "");
        assert!(matches!(edit.save(&store), Err(AdminError::Validation(_))));

        edit.set_correct(0).unwrap();
        let saved = edit.save(&store).unwrap();
        assert_eq!(saved.options, vec!["a. Y".to_string(), "b. Z".to_string()]);
        assert_eq!(saved.correct_answer, "a. Y");
    }

    #[test]
    fn test_option_bounds() {
        let store = InMemoryStore::new();
        let mut edit = QuestionEdit::load(&store, stored(&store)).unwrap();
        edit.add_option().unwrap();
        edit.add_option().unwrap();
        assert!(matches!(edit.add_option(), Err(AdminError::Validation(_))));

        for _ in 0..3 {
            edit.remove_option(0).unwrap();
        }
        assert!(matches!(edit.remove_option(0), Err(AdminError::Validation(_))));
    }

    #[test]
    fn test_editing_correct_option_text_persists() {
        let store = InMemoryStore::new();
        let id = stored(&store);
        let mut edit = QuestionEdit::load(&store, id).unwrap();
        edit.update_option_text(1, "Why").unwrap();
        edit.save(&store).unwrap();

        let reloaded = store.get_question(id).unwrap().unwrap();
        assert_eq!(reloaded.correct_answer, "b. Why");
        assert_eq!(reloaded.subject.as_deref(), Some("Math"));
    }

    #[test]
    fn test_manual_entry_saves_filled_forms() {
        use crate::auth::{MemorySessionStore, PasswordIdentity};
        use crate::config::AdminConfig;
        use crate::store::QueryFilter;

        let mut config = AdminConfig::default();
        config
            .subject_passwords
            .insert("Economics".to_string(), "eve123".to_string());
        let mut identity = PasswordIdentity::new(&config, MemorySessionStore::default()).unwrap();
        identity.login("Economics", "eve123").unwrap();

        let store = InMemoryStore::new();
        let mut entry = QuestionEntry::new();
        assert_eq!(entry.questions()[0].options.len(), 2);
        entry.grade = "Grade 12".to_string();
        entry.set_question_text(0, "Scarcity means?").unwrap();
        entry.update_option_text(0, 0, "Limited resources").unwrap();
        entry.update_option_text(0, 1, "Free goods").unwrap();
        assert!(matches!(entry.validate(), Err(AdminError::Validation(_))));

        entry.set_correct(0, 0).unwrap();
        assert_eq!(entry.save(&store, &identity).unwrap(), 1);

        let saved = store.query_questions(&QueryFilter::subject("Economics")).unwrap();
        assert_eq!(saved[0].correct_answer, "a. Limited resources");
        assert_eq!(saved[0].options, vec!["a. Limited resources", "b. Free goods"]);
    }

    #[test]
    fn test_manual_entry_forms() {
        let mut entry = QuestionEntry::new();
        assert_eq!(entry.add_question(), 1);
        entry.remove_question(0).unwrap();
        entry.remove_question(0).unwrap();
        assert_eq!(entry.questions().len(), 1);
        assert!(matches!(entry.remove_question(4), Err(AdminError::Validation(_))));
        assert!(matches!(entry.remove_option(0, 0), Err(AdminError::Validation(_))));
    }

    #[test]
    fn test_load_missing_question() {
        let store = InMemoryStore::new();
        assert!(matches!(
            QuestionEdit::load(&store, Uuid::new_v4()),
            Err(AdminError::NotFound(_))
        ));
    }
}
