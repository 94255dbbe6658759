//! Bulk import screens: edit text, watch the live parse, save the result.

use bulk_core::{BulkEditor, BulkKind, BulkParse, Flashcards, ParsedFlashcard, ParsedQuestion, Questions};

use crate::auth::IdentityProvider;
use crate::catalog::BULK_EDITOR_LIMIT;
use crate::error::{AdminError, Result};
use crate::models::{NewFlashcard, NewQuestion, RecordMeta};
use crate::store::ContentStore;

/// Host-side knowledge about a bulk kind: completeness and persistence.
pub trait ImportKind: BulkKind {
    /// Plural name used in logs.
    const LABEL: &'static str;

    /// Message shown when pre-submit validation fails.
    const INCOMPLETE_MESSAGE: &'static str;

    fn is_complete(record: &Self::Record) -> bool;

    /// Insert the records, returning how many were stored.
    fn insert(
        store: &dyn ContentStore,
        records: Vec<Self::Record>,
        meta: &RecordMeta,
    ) -> Result<usize>;
}

impl ImportKind for Flashcards {
    const LABEL: &'static str = "flashcards";
    const INCOMPLETE_MESSAGE: &'static str =
        "Please select a grade and ensure all flashcards have front and back text.";

    fn is_complete(record: &ParsedFlashcard) -> bool {
        record.is_complete()
    }

    fn insert(
        store: &dyn ContentStore,
        records: Vec<ParsedFlashcard>,
        meta: &RecordMeta,
    ) -> Result<usize> {
        let cards = records
            .into_iter()
            .map(|card| NewFlashcard::from_parsed(card, meta))
            .collect();
        Ok(store.insert_flashcards(cards)?.len())
    }
}

impl ImportKind for Questions {
    const LABEL: &'static str = "questions";
    const INCOMPLETE_MESSAGE: &'static str =
        "Please select a grade and ensure all questions have text, options, and a correct answer.";

    fn is_complete(record: &ParsedQuestion) -> bool {
        record.is_complete()
    }

    fn insert(
        store: &dyn ContentStore,
        records: Vec<ParsedQuestion>,
        meta: &RecordMeta,
    ) -> Result<usize> {
        let questions = records
            .into_iter()
            .map(|question| NewQuestion::from_parsed(question, meta))
            .collect();
        Ok(store.insert_questions(questions)?.len())
    }
}

/// One bulk "new content" screen.
pub struct BulkImport<K: ImportKind> {
    editor: BulkEditor<K>,
    latest: BulkParse<K::Record>,
    pub grade: String,
    pub unit: String,
    pub is_premium: bool,
}

impl<K: ImportKind> Default for BulkImport<K>
where
    K::Record: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ImportKind> BulkImport<K>
where
    K::Record: Clone,
{
    pub fn new() -> Self {
        Self::with_content("")
    }

    /// Screen reopened with previously saved editor markup.
    pub fn with_content(markup: &str) -> Self {
        let mut editor = BulkEditor::<K>::new().with_limit(BULK_EDITOR_LIMIT);
        let latest = editor.set_content(markup);
        Self {
            editor,
            latest,
            grade: String::new(),
            unit: String::new(),
            is_premium: false,
        }
    }

    pub fn editor(&self) -> &BulkEditor<K> {
        &self.editor
    }

    /// Records from the latest parse.
    pub fn records(&self) -> &[K::Record] {
        &self.latest.records
    }

    /// Editor markup from the latest parse.
    pub fn raw_markup(&self) -> &str {
        &self.latest.raw_markup
    }

    fn update(&mut self, parse: BulkParse<K::Record>) -> &[K::Record] {
        self.latest = parse;
        &self.latest.records
    }

    pub fn type_str(&mut self, text: &str) -> &[K::Record] {
        let parse = self.editor.type_str(text);
        self.update(parse)
    }

    pub fn paste(&mut self, text: &str) -> &[K::Record] {
        let parse = self.editor.paste(text);
        self.update(parse)
    }

    pub fn enter(&mut self) -> &[K::Record] {
        let parse = self.editor.enter();
        self.update(parse)
    }

    pub fn backspace(&mut self) -> &[K::Record] {
        let parse = self.editor.backspace();
        self.update(parse)
    }

    pub fn set_content(&mut self, markup: &str) -> &[K::Record] {
        let parse = self.editor.set_content(markup);
        self.update(parse)
    }

    /// Pre-submit checks: a grade, at least one record, every record complete.
    pub fn validate(&self) -> Result<()> {
        let records = &self.latest.records;
        if self.grade.trim().is_empty()
            || records.is_empty()
            || !records.iter().all(K::is_complete)
        {
            return Err(AdminError::Validation(K::INCOMPLETE_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Validate, tag every record with the logged-in subject and the
    /// screen's grade/unit/premium selection, and insert them.
    pub fn save(&self, store: &dyn ContentStore, identity: &dyn IdentityProvider) -> Result<usize> {
        let subject = identity.require_subject()?;
        self.validate()?;

        let meta = RecordMeta {
            subject: subject.to_string(),
            grade: self.grade.clone(),
            unit: self.unit.clone(),
            is_premium: self.is_premium,
        };
        let count = K::insert(store, self.latest.records.clone(), &meta)?;
        tracing::info!("Saved {} {} for {} ({})", count, K::LABEL, subject, meta.grade);
        Ok(count)
    }
}
