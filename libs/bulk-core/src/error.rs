//! Error types for bulk-core.
//!
//! Parsing itself never fails; malformed lines are dropped. Only the
//! explicit question editing operations report errors.

use thiserror::Error;

/// Result type alias using EditError.
pub type Result<T> = std::result::Result<T, EditError>;

/// Errors raised when editing a question's option list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("option index {index} out of range ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("a question can hold at most {max} options")]
    TooManyOptions { max: usize },
}
