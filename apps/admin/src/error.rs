//! Error handling for the admin host

use thiserror::Error;
use uuid::Uuid;

/// Admin error types
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Incorrect subject or password.")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Not found: {0}")]
    NotFound(Uuid),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Edit error: {0}")]
    Edit(#[from] bulk_core::EditError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for admin operations
pub type Result<T> = std::result::Result<T, AdminError>;
