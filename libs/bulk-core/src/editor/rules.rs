//! Input rules: rewrites triggered by what the admin just typed.
//!
//! Rules are cosmetic. Whatever they leave in the text must still parse the
//! same way, so the separator rule inserts the glyph the flashcard grammar
//! recognises and the correct-answer rule only adds a highlight.

use std::ops::Range;

use super::document::{Block, Cursor, Document, Mark};
use crate::flashcard::SEPARATOR_GLYPH;
use crate::question::CORRECT_MARKERS;

/// Document plus caret, the state input rules operate on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub(crate) doc: Document,
    pub(crate) cursor: Cursor,
}

impl EditorState {
    /// Caret placed at the end of the document.
    pub fn new(doc: Document) -> Self {
        let block = doc.blocks().len() - 1;
        let offset = doc.blocks()[block].text.len();
        Self {
            doc,
            cursor: Cursor { block, offset },
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn current(&mut self) -> &mut Block {
        &mut self.doc.blocks_mut()[self.cursor.block]
    }

    /// Text of the current block up to the caret.
    pub fn text_before_cursor(&self) -> &str {
        &self.doc.blocks()[self.cursor.block].text[..self.cursor.offset]
    }

    /// Insert text at the caret and move past it. Newlines split blocks.
    pub fn insert_text(&mut self, text: &str) {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.insert_inline(first);
        }
        for line in lines {
            self.split_block();
            self.insert_inline(line);
        }
    }

    fn insert_inline(&mut self, text: &str) {
        let offset = self.cursor.offset;
        self.current().text.insert_str(offset, text);
        self.cursor.offset += text.len();
    }

    /// Replace a byte range of the current block, leaving the caret after
    /// the replacement.
    pub fn replace_range(&mut self, range: Range<usize>, with: &str) {
        let start = range.start;
        self.current().text.replace_range(range, with);
        self.cursor.offset = start + with.len();
    }

    /// Split the current block at the caret; the caret moves to the start
    /// of the new block.
    pub fn split_block(&mut self) {
        let offset = self.cursor.offset;
        let tail = self.current().text.split_off(offset);
        let index = self.cursor.block + 1;
        self.doc.blocks_mut().insert(index, Block::new(tail));
        self.cursor = Cursor {
            block: index,
            offset: 0,
        };
    }

    /// Delete the character before the caret, joining with the previous
    /// block at a block start.
    pub fn delete_backward(&mut self) {
        let Cursor { block, offset } = self.cursor;
        if offset > 0 {
            let text = &mut self.doc.blocks_mut()[block].text;
            let width = text[..offset].chars().next_back().map_or(0, char::len_utf8);
            text.replace_range(offset - width..offset, "");
            self.cursor.offset -= width;
        } else if block > 0 {
            let removed = self.doc.blocks_mut().remove(block);
            let previous = &mut self.doc.blocks_mut()[block - 1];
            let join_at = previous.text.len();
            previous.text.push_str(&removed.text);
            self.cursor = Cursor {
                block: block - 1,
                offset: join_at,
            };
        }
    }

    /// Mark the current block.
    pub fn add_mark(&mut self, mark: Mark) {
        self.current().add_mark(mark);
    }
}

/// A rewrite keyed on the text just before the caret.
pub trait InputRule: Send + Sync {
    /// Rule identifier.
    fn name(&self) -> &'static str;

    /// Byte offset where the trigger starts if `text_before` ends with it.
    fn find(&self, text_before: &str) -> Option<usize>;

    /// Rewrite the matched range of the current block.
    fn apply(&self, state: &mut EditorState, range: Range<usize>);
}

/// `>>` or `::` becomes ` ↓ ` and the caret jumps to a new line for the back.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparatorRule;

impl InputRule for SeparatorRule {
    fn name(&self) -> &'static str {
        "flashcard_separator"
    }

    fn find(&self, text_before: &str) -> Option<usize> {
        [">>", "::"]
            .iter()
            .find(|trigger| text_before.ends_with(*trigger))
            .map(|trigger| text_before.len() - trigger.len())
    }

    fn apply(&self, state: &mut EditorState, range: Range<usize>) {
        state.replace_range(range, &format!(" {} ", SEPARATOR_GLYPH));
        state.split_block();
    }
}

/// Typing `/n` starts a new line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBreakRule;

impl InputRule for LineBreakRule {
    fn name(&self) -> &'static str {
        "line_break"
    }

    fn find(&self, text_before: &str) -> Option<usize> {
        text_before.strip_suffix("/n").map(str::len)
    }

    fn apply(&self, state: &mut EditorState, range: Range<usize>) {
        state.replace_range(range, "");
        state.split_block();
    }
}

/// A trailing `<` or `*` highlights the option line as the correct answer.
/// The marker stays in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrectAnswerRule;

impl InputRule for CorrectAnswerRule {
    fn name(&self) -> &'static str {
        "correct_answer"
    }

    fn find(&self, text_before: &str) -> Option<usize> {
        let head = text_before.strip_suffix(|c: char| CORRECT_MARKERS.contains(&c))?;
        Some(head.trim_end().len())
    }

    fn apply(&self, state: &mut EditorState, _range: Range<usize>) {
        state.add_mark(Mark::CorrectAnswer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn separator_trigger() {
        assert_eq!(SeparatorRule.find("Front >>"), Some(6));
        assert_eq!(SeparatorRule.find("Front ::"), Some(6));
        assert_eq!(SeparatorRule.find("Front >"), None);
    }

    #[test]
    fn separator_rewrites_and_splits() {
        let mut state = EditorState::new(Document::from_plain_text("Front >>"));
        SeparatorRule.apply(&mut state, 6..8);
        assert_eq!(state.document().plain_text(), "Front  ↓ \n");
        assert_eq!(state.cursor(), Cursor { block: 1, offset: 0 });
    }

    #[test]
    fn line_break_trigger() {
        let mut state = EditorState::new(Document::from_plain_text("Q: hi/n"));
        let start = LineBreakRule.find(state.text_before_cursor()).unwrap();
        LineBreakRule.apply(&mut state, start..7);
        assert_eq!(state.document().plain_text(), "Q: hi\n");
    }

    #[test]
    fn correct_answer_trigger_keeps_text() {
        let mut state = EditorState::new(Document::from_plain_text("b. 4 <"));
        assert_eq!(CorrectAnswerRule.find(state.text_before_cursor()), Some(4));
        CorrectAnswerRule.apply(&mut state, 4..6);
        assert_eq!(state.document().plain_text(), "b. 4 <");
        assert!(state.document().blocks()[0].has_mark(Mark::CorrectAnswer));
    }

    #[test]
    fn delete_backward_joins_blocks() {
        let mut state = EditorState::new(Document::from_plain_text("ab\n"));
        state.delete_backward();
        assert_eq!(state.document().plain_text(), "ab");
        assert_eq!(state.cursor(), Cursor { block: 0, offset: 2 });

        state.delete_backward();
        assert_eq!(state.document().plain_text(), "a");
    }

    #[test]
    fn delete_backward_handles_multibyte() {
        let mut state = EditorState::new(Document::from_plain_text("x↓"));
        state.delete_backward();
        assert_eq!(state.document().plain_text(), "x");
    }

    #[test]
    fn insert_multiline_text() {
        let mut state = EditorState::new(Document::new());
        state.insert_text("one\ntwo");
        assert_eq!(state.document().blocks().len(), 2);
        assert_eq!(state.cursor(), Cursor { block: 1, offset: 3 });
    }
}
