//! Record types produced by the bulk parsers.

use serde::{Deserialize, Serialize};

/// Highest number of options a question can carry (`a` through `z`).
pub const MAX_OPTION_KEYS: usize = 26;

/// Positional option key for the given index: 0 -> `a`, 1 -> `b`, ...
pub fn option_key(index: usize) -> Option<char> {
    if index < MAX_OPTION_KEYS {
        Some((b'a' + index as u8) as char)
    } else {
        None
    }
}

/// A flashcard recognised in bulk editor text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFlashcard {
    pub front_text: String,
    pub back_text: String,
}

impl ParsedFlashcard {
    /// Both sides carry text once trimmed.
    pub fn is_complete(&self) -> bool {
        !self.front_text.trim().is_empty() && !self.back_text.trim().is_empty()
    }
}

/// One answer option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOption {
    pub key: char,
    pub text: String,
}

impl ParsedOption {
    pub fn new(key: char, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }

    /// Formatted form `"{key}. {text}"`, used both for `correct_answer`
    /// and for the persisted option list.
    pub fn formatted(&self) -> String {
        format!("{}. {}", self.key, self.text)
    }

    /// Parse an option back from its persisted string form (`"b. Paris"`,
    /// `"B: Paris"`, `"b Paris"`). Returns `None` when the string does not
    /// start with a letter.
    pub fn from_stored(stored: &str) -> Option<Self> {
        let mut chars = stored.chars();
        let key = chars.next().filter(char::is_ascii_alphabetic)?;
        let rest = chars.as_str();
        let rest = rest
            .strip_prefix('.')
            .or_else(|| rest.strip_prefix(':'))
            .unwrap_or(rest);

        Some(Self {
            key: key.to_ascii_lowercase(),
            text: rest.trim().to_string(),
        })
    }
}

/// A multiple-choice question recognised in bulk editor text.
///
/// `correct_answer` is the formatted form of the option marked correct, or
/// empty when none is marked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuestion {
    pub question_text: String,
    pub options: Vec<ParsedOption>,
    pub correct_answer: String,
}

impl ParsedQuestion {
    /// Question text, at least one option and a correct answer.
    pub fn is_complete(&self) -> bool {
        !self.question_text.trim().is_empty()
            && !self.options.is_empty()
            && !self.correct_answer.trim().is_empty()
    }

    /// Position of the one option whose formatted form equals
    /// `correct_answer`. `None` when no option or several options match.
    pub fn correct_index(&self) -> Option<usize> {
        if self.correct_answer.is_empty() {
            return None;
        }
        let mut matching = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, opt)| opt.formatted() == self.correct_answer)
            .map(|(idx, _)| idx);
        match (matching.next(), matching.next()) {
            (Some(idx), None) => Some(idx),
            _ => None,
        }
    }

    /// The option named by `correct_answer`, if exactly one matches.
    pub fn correct_option(&self) -> Option<&ParsedOption> {
        self.correct_index().map(|idx| &self.options[idx])
    }

    /// Options as persisted by the content store, in display order.
    pub fn stored_options(&self) -> Vec<String> {
        self.options.iter().map(ParsedOption::formatted).collect()
    }
}

/// Records of one parse pass together with the editor's serialized markup,
/// so the host can persist both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkParse<R> {
    pub records: Vec<R>,
    pub raw_markup: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn option_keys_are_positional() {
        assert_eq!(option_key(0), Some('a'));
        assert_eq!(option_key(3), Some('d'));
        assert_eq!(option_key(25), Some('z'));
        assert_eq!(option_key(26), None);
    }

    #[test]
    fn formatted_option() {
        assert_eq!(ParsedOption::new('b', "4").formatted(), "b. 4");
        assert_eq!(ParsedOption::new('c', "").formatted(), "c. ");
    }

    #[test]
    fn from_stored_variants() {
        assert_eq!(
            ParsedOption::from_stored("b. Paris"),
            Some(ParsedOption::new('b', "Paris"))
        );
        assert_eq!(
            ParsedOption::from_stored("C: Rome "),
            Some(ParsedOption::new('c', "Rome"))
        );
        assert_eq!(
            ParsedOption::from_stored("d Berlin"),
            Some(ParsedOption::new('d', "Berlin"))
        );
        assert_eq!(ParsedOption::from_stored("42"), None);
        assert_eq!(ParsedOption::from_stored(""), None);
    }

    #[test]
    fn question_completeness() {
        let mut question = ParsedQuestion {
            question_text: "2+2?".to_string(),
            options: vec![ParsedOption::new('a', "4")],
            correct_answer: String::new(),
        };
        assert!(!question.is_complete());
        assert_eq!(question.correct_option(), None);

        question.correct_answer = "a. 4".to_string();
        assert!(question.is_complete());
        assert_eq!(question.correct_option(), Some(&question.options[0]));
        assert_eq!(question.stored_options(), vec!["a. 4".to_string()]);
    }

    #[test]
    fn duplicate_correct_option_is_ambiguous() {
        let question = ParsedQuestion {
            question_text: "pick".to_string(),
            options: vec![ParsedOption::new('a', "1"), ParsedOption::new('a', "1")],
            correct_answer: "a. 1".to_string(),
        };
        assert_eq!(question.correct_index(), None);
        assert_eq!(question.correct_option(), None);
    }

    #[test]
    fn flashcard_completeness() {
        let card = ParsedFlashcard {
            front_text: "  ".to_string(),
            back_text: "back".to_string(),
        };
        assert!(!card.is_complete());
    }
}
