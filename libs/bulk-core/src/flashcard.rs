//! Bulk flashcard parser.
//!
//! # Format
//! ```text
//! Front >> Back
//! Front :: Back
//! Front ↓
//! Back on the next line
//! more back text
//! ---
//! Next front >> Next back
//! ```
//!
//! A card only begins at a line with a separator; lines before the first
//! separator are ignored. `---` on its own line ends the current card.

use crate::accumulator::{parse_with, Classified, LineGrammar};
use crate::types::ParsedFlashcard;

/// Glyph the editor substitutes for `>>` and `::` as the admin types.
pub const SEPARATOR_GLYPH: char = '↓';

/// Explicit record boundary line, shared by both grammars.
pub const BOUNDARY: &str = "---";

/// Parse bulk editor text into flashcards. Never fails; incomplete cards
/// are dropped.
pub fn parse_flashcards(text: &str) -> Vec<ParsedFlashcard> {
    parse_with(FlashcardGrammar, text)
}

/// A line holding a separator: the front and the optional start of the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine<'a> {
    pub front: &'a str,
    pub back: Option<&'a str>,
}

/// Card under construction.
#[derive(Debug, Default)]
pub struct CardDraft {
    front: String,
    back: Vec<String>,
}

/// Grammar for the flashcard bulk format.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlashcardGrammar;

impl FlashcardGrammar {
    /// Locate the separator in a line. The glyph takes priority, then `>>`,
    /// then `::`, regardless of which appears first.
    fn find_separator(line: &str) -> Option<(usize, usize)> {
        if let Some(idx) = line.find(SEPARATOR_GLYPH) {
            return Some((idx, SEPARATOR_GLYPH.len_utf8()));
        }
        if let Some(idx) = line.find(">>") {
            return Some((idx, 2));
        }
        line.find("::").map(|idx| (idx, 2))
    }
}

impl LineGrammar for FlashcardGrammar {
    type Start<'a> = SplitLine<'a>;
    type Line<'a> = &'a str;
    type Draft = CardDraft;
    type Record = ParsedFlashcard;

    fn classify<'a>(&self, line: &'a str, accumulating: bool) -> Classified<SplitLine<'a>, &'a str> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Classified::Blank;
        }
        if trimmed == BOUNDARY {
            return Classified::Boundary;
        }

        if let Some((idx, len)) = Self::find_separator(line) {
            let front = line[..idx].trim();
            let after = line[idx + len..].trim_start();
            let back = if after.is_empty() { None } else { Some(after) };
            return Classified::Start(SplitLine { front, back });
        }

        if accumulating {
            Classified::Continue(line)
        } else {
            Classified::Orphan
        }
    }

    fn open(&self, start: SplitLine<'_>) -> CardDraft {
        CardDraft {
            front: start.front.to_string(),
            back: start.back.map(str::to_string).into_iter().collect(),
        }
    }

    fn extend(&self, draft: &mut CardDraft, line: &str) {
        draft.back.push(line.to_string());
    }

    fn finish(&self, draft: CardDraft) -> Option<ParsedFlashcard> {
        let card = ParsedFlashcard {
            front_text: draft.front.trim().to_string(),
            back_text: draft.back.join("\n").trim().to_string(),
        };
        card.is_complete().then_some(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn card(front: &str, back: &str) -> ParsedFlashcard {
        ParsedFlashcard {
            front_text: front.to_string(),
            back_text: back.to_string(),
        }
    }

    #[test]
    fn arrow_separator() {
        assert_eq!(parse_flashcards("A >> B"), vec![card("A", "B")]);
    }

    #[test]
    fn colon_separator() {
        assert_eq!(parse_flashcards("A :: B"), vec![card("A", "B")]);
    }

    #[test]
    fn separator_without_spaces() {
        assert_eq!(parse_flashcards("A>>B"), vec![card("A", "B")]);
    }

    #[test]
    fn explicit_boundary() {
        assert_eq!(
            parse_flashcards("A >> B\n---\nC >> D"),
            vec![card("A", "B"), card("C", "D")]
        );
    }

    #[test]
    fn orphan_line_dropped() {
        assert!(parse_flashcards("just some text with no separator").is_empty());
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(parse_flashcards("").is_empty());
        assert!(parse_flashcards("\n\n   \n").is_empty());
    }

    #[test]
    fn glyph_then_back_on_following_lines() {
        let input = "Capital of France ↓ \nParis\nCity of light";
        assert_eq!(
            parse_flashcards(input),
            vec![card("Capital of France", "Paris\nCity of light")]
        );
    }

    #[test]
    fn blank_lines_inside_back_are_skipped() {
        let input = "Q ↓\nline one\n\nline two";
        assert_eq!(parse_flashcards(input), vec![card("Q", "line one\nline two")]);
    }

    #[test]
    fn continuation_keeps_leading_indent() {
        let input = "Code >> fn main() {\n    body();\n}";
        assert_eq!(
            parse_flashcards(input),
            vec![card("Code", "fn main() {\n    body();\n}")]
        );
    }

    #[test]
    fn separator_line_starts_new_card() {
        let input = "A >> B\nmore B\nC :: D";
        assert_eq!(
            parse_flashcards(input),
            vec![card("A", "B\nmore B"), card("C", "D")]
        );
    }

    #[test]
    fn glyph_wins_over_arrow() {
        let input = "x >> y ↓ z";
        assert_eq!(parse_flashcards(input), vec![card("x >> y", "z")]);
    }

    #[test]
    fn arrow_wins_over_colons() {
        let input = "a :: b >> c";
        assert_eq!(parse_flashcards(input), vec![card("a :: b", "c")]);
    }

    #[test]
    fn card_without_back_is_dropped() {
        let input = "Lonely >>\n---\nFull >> card";
        assert_eq!(parse_flashcards(input), vec![card("Full", "card")]);
    }

    #[test]
    fn card_without_front_is_dropped() {
        assert!(parse_flashcards(">> back only\nmore").is_empty());
    }

    #[test]
    fn lines_after_boundary_are_orphans() {
        let input = "A >> B\n---\nstray text\nC >> D";
        assert_eq!(parse_flashcards(input), vec![card("A", "B"), card("C", "D")]);
    }

    #[test]
    fn indented_boundary() {
        let input = "A >> B\n   ---   \nC >> D";
        assert_eq!(parse_flashcards(input).len(), 2);
    }

    #[test]
    fn windows_newlines() {
        assert_eq!(
            parse_flashcards("A >> B\r\nmore\r\n---\r\nC >> D"),
            vec![card("A", "B\nmore"), card("C", "D")]
        );
    }
}
