//! Block document standing in for the rich-text editing surface.
//!
//! A document is a list of paragraphs. Its plain-text projection joins the
//! blocks with `\n`, and that projection is the only thing the parsers read.
//! Marks are display styling and never reach the plain text.

use serde::{Deserialize, Serialize};

use crate::question::CORRECT_MARKERS;

/// Class name of the span wrapping a highlighted correct option.
pub const CORRECT_ANSWER_CLASS: &str = "correct-answer-indicator";

/// Inline styling applied to a whole block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// Faint highlight on an option line ending in a correct marker.
    CorrectAnswer,
}

impl Mark {
    /// Whether the mark still describes the block's text.
    pub fn holds_for(self, text: &str) -> bool {
        match self {
            Self::CorrectAnswer => text
                .trim_end()
                .ends_with(|c: char| CORRECT_MARKERS.contains(&c)),
        }
    }
}

/// One paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl Block {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        self.marks.contains(&mark)
    }

    pub fn add_mark(&mut self, mark: Mark) {
        if !self.has_mark(mark) {
            self.marks.push(mark);
        }
    }

    fn to_markup(&self) -> String {
        let text = escape(&self.text);
        if self.has_mark(Mark::CorrectAnswer) {
            format!("<p><span class=\"{}\">{}</span></p>", CORRECT_ANSWER_CLASS, text)
        } else {
            format!("<p>{}</p>", text)
        }
    }
}

/// Position of the caret: block index and byte offset within its text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub block: usize,
    pub offset: usize,
}

/// Ordered paragraphs; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document holding one empty block.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::default()],
        }
    }

    fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            Self::new()
        } else {
            Self { blocks }
        }
    }

    /// One block per line.
    pub fn from_plain_text(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        Self::from_blocks(normalized.split('\n').map(Block::new).collect())
    }

    /// Read the paragraph markup produced by [`Document::to_markup`].
    /// Input that does not open with a paragraph is taken as plain text.
    pub fn from_markup(markup: &str) -> Self {
        let head = markup.trim_start();
        if !(head.starts_with("<p>") || head.starts_with("<p ")) {
            return Self::from_plain_text(markup);
        }

        let mut blocks = Vec::new();
        let mut rest = markup;
        while let Some((body_start, inner_end, next)) = next_paragraph(rest) {
            blocks.extend(blocks_from_inner(&rest[body_start..inner_end]));
            rest = &rest[next..];
        }

        if blocks.is_empty() {
            Self::from_plain_text(markup)
        } else {
            Self::from_blocks(blocks)
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    /// Plain-text projection read by the parsers.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialized markup, one `<p>` per block.
    pub fn to_markup(&self) -> String {
        self.blocks.iter().map(Block::to_markup).collect()
    }

    /// Characters of text, not counting block breaks.
    pub fn char_count(&self) -> usize {
        self.blocks.iter().map(|block| block.text.chars().count()).sum()
    }

    /// Drop marks that no longer match their block's text.
    pub fn refresh_marks(&mut self) {
        for block in &mut self.blocks {
            let text = &block.text;
            block.marks.retain(|mark| mark.holds_for(text));
        }
    }
}

/// Find the next `<p>` element: returns (body start, body end, resume offset).
fn next_paragraph(markup: &str) -> Option<(usize, usize, usize)> {
    let mut search = 0;
    loop {
        let open = search + markup[search..].find("<p")?;
        let after = &markup[open + 2..];
        if after.starts_with('>') || after.starts_with(' ') {
            let body_start = open + 2 + after.find('>')? + 1;
            let body = &markup[body_start..];
            return Some(match body.find("</p>") {
                Some(end) => (body_start, body_start + end, body_start + end + 4),
                None => (body_start, markup.len(), markup.len()),
            });
        }
        search = open + 2;
    }
}

/// Turn paragraph content into blocks; `<br>` starts a new block.
fn blocks_from_inner(inner: &str) -> Vec<Block> {
    let mut text = String::new();
    let mut marked = false;
    let mut rest = inner;

    while let Some(lt) = rest.find('<') {
        text.push_str(&rest[..lt]);
        let tag_end = match rest[lt..].find('>') {
            Some(gt) => lt + gt,
            None => {
                text.push_str(&rest[lt..]);
                rest = "";
                break;
            }
        };
        let tag = &rest[lt + 1..tag_end];
        if tag.contains(CORRECT_ANSWER_CLASS) {
            marked = true;
        } else if tag.trim_end_matches('/').trim().eq_ignore_ascii_case("br") {
            text.push('\n');
        }
        rest = &rest[tag_end + 1..];
    }
    text.push_str(rest);

    unescape(&text)
        .split('\n')
        .map(|line| {
            let mut block = Block::new(line);
            if marked {
                block.add_mark(Mark::CorrectAnswer);
            }
            block
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
