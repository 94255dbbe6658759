//! Option list editing for a single question.
//!
//! `correct_answer` holds the formatted form of the correct option rather
//! than a reference to it, so every edit re-synchronises it here. Removing
//! an option re-keys the rest densely (`a`, `b`, `c`, ...) and clears the
//! correct answer whenever the correct option was removed or shifted.

use crate::error::{EditError, Result};
use crate::types::{option_key, ParsedOption, ParsedQuestion, MAX_OPTION_KEYS};

impl ParsedQuestion {
    /// Empty question with two blank options, as offered for manual entry.
    pub fn new_blank() -> Self {
        Self {
            question_text: String::new(),
            options: vec![ParsedOption::new('a', ""), ParsedOption::new('b', "")],
            correct_answer: String::new(),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.options.len() {
            Ok(())
        } else {
            Err(EditError::OptionOutOfRange {
                index,
                len: self.options.len(),
            })
        }
    }

    /// Append an option keyed after its position.
    pub fn add_option(&mut self, text: impl Into<String>) -> Result<&ParsedOption> {
        let key = option_key(self.options.len()).ok_or(EditError::TooManyOptions {
            max: MAX_OPTION_KEYS,
        })?;
        self.options.push(ParsedOption::new(key, text));
        Ok(&self.options[self.options.len() - 1])
    }

    /// Remove the option at `index` and re-key the remaining options.
    ///
    /// The correct answer survives only when the correct option sat before
    /// the removed one, and then follows that option's new key.
    pub fn remove_option(&mut self, index: usize) -> Result<ParsedOption> {
        self.check_index(index)?;
        let correct = self.correct_index();
        let removed = self.options.remove(index);

        for (idx, option) in self.options.iter_mut().enumerate() {
            if let Some(key) = option_key(idx) {
                option.key = key;
            }
        }

        match correct {
            Some(idx) if idx < index => self.correct_answer = self.options[idx].formatted(),
            _ => self.correct_answer.clear(),
        }
        Ok(removed)
    }

    /// Replace an option's text, following it with `correct_answer` when
    /// that option was the correct one.
    pub fn update_option_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        let option = &mut self.options[index];
        let was_correct = self.correct_answer == option.formatted();
        option.text = text.into();
        if was_correct {
            self.correct_answer = option.formatted();
        }
        Ok(())
    }

    /// Mark the option at `index` as correct.
    pub fn set_correct(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.correct_answer = self.options[index].formatted();
        Ok(())
    }
}
