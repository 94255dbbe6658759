//! Editor adapter for the bulk parsers.
//!
//! Models the rich-text surface as a block document with a caret, runs the
//! cosmetic input rules as the admin types and re-parses the plain-text
//! projection after every change. The parsers never see marks.

pub mod document;
pub mod rules;

use std::marker::PhantomData;

use crate::flashcard::parse_flashcards;
use crate::question::parse_questions;
use crate::types::{BulkParse, ParsedFlashcard, ParsedQuestion};

pub use document::{Block, Cursor, Document, Mark, CORRECT_ANSWER_CLASS};
pub use rules::{CorrectAnswerRule, EditorState, InputRule, LineBreakRule, SeparatorRule};

/// A kind of bulk content: its parser and the input rules its editor uses.
pub trait BulkKind {
    type Record;

    /// Parse a plain-text snapshot.
    fn parse(text: &str) -> Vec<Self::Record>;

    /// Rules registered on the editor, tried in order.
    fn input_rules() -> Vec<Box<dyn InputRule>>;
}

/// Flashcards: `>>`/`::` turn into the separator glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flashcards;

impl BulkKind for Flashcards {
    type Record = ParsedFlashcard;

    fn parse(text: &str) -> Vec<ParsedFlashcard> {
        parse_flashcards(text)
    }

    fn input_rules() -> Vec<Box<dyn InputRule>> {
        vec![Box::new(SeparatorRule)]
    }
}

/// Questions: trailing `<`/`*` highlights the correct option.
#[derive(Debug, Clone, Copy, Default)]
pub struct Questions;

impl BulkKind for Questions {
    type Record = ParsedQuestion;

    fn parse(text: &str) -> Vec<ParsedQuestion> {
        parse_questions(text)
    }

    fn input_rules() -> Vec<Box<dyn InputRule>> {
        vec![Box::new(LineBreakRule), Box::new(CorrectAnswerRule)]
    }
}

/// Parse the plain text of a document and pair it with the document markup.
pub fn parse_document<K: BulkKind>(doc: &Document) -> BulkParse<K::Record> {
    BulkParse {
        records: K::parse(&doc.plain_text()),
        raw_markup: doc.to_markup(),
    }
}

/// Bulk editor session for one kind of content.
pub struct BulkEditor<K: BulkKind> {
    state: EditorState,
    rules: Vec<Box<dyn InputRule>>,
    limit: Option<usize>,
    _kind: PhantomData<K>,
}

impl<K: BulkKind> Default for BulkEditor<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: BulkKind> BulkEditor<K> {
    /// Empty editor with the kind's input rules.
    pub fn new() -> Self {
        Self {
            state: EditorState::default(),
            rules: K::input_rules(),
            limit: None,
            _kind: PhantomData,
        }
    }

    /// Editor loaded with previously saved markup (or plain text).
    pub fn with_content(markup: &str) -> Self {
        let mut editor = Self::new();
        editor.set_content(markup);
        editor
    }

    /// Cap the number of characters the document may hold.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Register an extra input rule, tried after the built-in ones.
    pub fn add_rule(&mut self, rule: Box<dyn InputRule>) {
        self.rules.push(rule);
    }

    pub fn document(&self) -> &Document {
        self.state.document()
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor()
    }

    pub fn plain_text(&self) -> String {
        self.state.document().plain_text()
    }

    pub fn markup(&self) -> String {
        self.state.document().to_markup()
    }

    pub fn char_count(&self) -> usize {
        self.state.document().char_count()
    }

    /// Current parse of the document.
    pub fn snapshot(&self) -> BulkParse<K::Record> {
        parse_document::<K>(self.state.document())
    }

    /// Replace the whole document; the caret moves to the end.
    pub fn set_content(&mut self, markup: &str) -> BulkParse<K::Record> {
        let mut doc = Document::from_markup(markup);
        doc.refresh_marks();
        self.state = EditorState::new(doc);
        self.snapshot()
    }

    fn remaining(&self) -> usize {
        self.limit
            .map_or(usize::MAX, |limit| limit.saturating_sub(self.char_count()))
    }

    fn changed(&mut self) -> BulkParse<K::Record> {
        self.state.doc.refresh_marks();
        self.snapshot()
    }

    fn type_one(&mut self, c: char) {
        if c == '\n' {
            self.state.split_block();
            return;
        }
        if self.remaining() == 0 {
            return;
        }

        let mut buf = [0u8; 4];
        self.state.insert_text(c.encode_utf8(&mut buf));

        let end = self.state.cursor.offset;
        let text_before = self.state.text_before_cursor();
        let hit = self
            .rules
            .iter()
            .find_map(|rule| rule.find(text_before).map(|start| (rule, start)));
        if let Some((rule, start)) = hit {
            let before = self.state.clone();
            rule.apply(&mut self.state, start..end);
            if self.limit.is_some_and(|limit| self.char_count() > limit) {
                // no room for the rewrite; keep the trigger as typed
                self.state = before;
            }
        }
    }

    /// Type one character, running input rules.
    pub fn type_char(&mut self, c: char) -> BulkParse<K::Record> {
        self.type_one(c);
        self.changed()
    }

    /// Type a string one character at a time, running input rules.
    pub fn type_str(&mut self, text: &str) -> BulkParse<K::Record> {
        for c in text.chars() {
            self.type_one(c);
        }
        self.changed()
    }

    /// Start a new block at the caret.
    pub fn enter(&mut self) -> BulkParse<K::Record> {
        self.state.split_block();
        self.changed()
    }

    /// Delete the character before the caret.
    pub fn backspace(&mut self) -> BulkParse<K::Record> {
        self.state.delete_backward();
        self.changed()
    }

    /// Insert text verbatim. Input rules do not run on pasted text.
    pub fn paste(&mut self, text: &str) -> BulkParse<K::Record> {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let room = self.remaining();
        let allowed: String = if normalized.chars().count() > room {
            let mut kept = 0;
            normalized
                .chars()
                .take_while(|c| {
                    if *c == '\n' {
                        return true;
                    }
                    kept += 1;
                    kept <= room
                })
                .collect()
        } else {
            normalized
        };
        self.state.insert_text(&allowed);
        self.changed()
    }
}
