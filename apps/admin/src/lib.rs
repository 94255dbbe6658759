//! Admin host for the quiz content platform.
//!
//! Wires the bulk parsers from `bulk-core` to the collaborators around them:
//! subject login, the content store, and the bulk import and edit screens.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod edit;
pub mod error;
pub mod import;
pub mod models;
pub mod notes;
pub mod store;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use auth::{FileSessionStore, IdentityProvider, MemorySessionStore, PasswordIdentity, Session};
pub use config::AdminConfig;
pub use edit::{QuestionEdit, QuestionEntry};
pub use error::{AdminError, Result};
pub use import::{BulkImport, ImportKind};
pub use notes::NoteEdit;
pub use store::{ContentStore, InMemoryStore, QueryFilter};

/// Install the global tracing subscriber with the configured log filter.
/// Logs go to stderr.
pub fn init_tracing(config: &AdminConfig) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
