//! Bulk content parsers for the quiz admin dashboard.
//!
//! Provides:
//! - Line-driven record accumulator shared by both parsers
//! - Flashcard parser (`Front >> Back`, `Front :: Back`, `---` boundaries)
//! - Multiple-choice question parser (`Q:` markers, lettered options, `<` correct marker)
//! - Option list editing that keeps the denormalized correct answer in sync
//! - Rendering parsed records back to editor text
//! - Editor adapter with cosmetic input rules and markup round-trip

pub mod accumulator;
pub mod editing;
pub mod editor;
pub mod error;
pub mod flashcard;
pub mod question;
pub mod render;
pub mod types;

pub use accumulator::{parse_with, Accumulator, Classified, LineGrammar};
pub use editor::{BulkEditor, BulkKind, Document, Flashcards, Questions};
pub use error::{EditError, Result};
pub use flashcard::{parse_flashcards, FlashcardGrammar};
pub use question::{parse_questions, QuestionGrammar};
pub use render::{render_flashcards, render_questions};
pub use types::{option_key, BulkParse, ParsedFlashcard, ParsedOption, ParsedQuestion};
