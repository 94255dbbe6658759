//! Subject login: one shared password per subject, session persisted locally.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::AdminConfig;
use crate::error::{AdminError, Result};

/// A logged-in subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub subject: String,
    pub logged_in_at: DateTime<Utc>,
}

/// Capability handed to screens that need to know who is logged in.
pub trait IdentityProvider {
    /// Check the subject's password and start a session.
    fn login(&mut self, subject: &str, password: &str) -> Result<Session>;

    /// Subject of the current session, if any.
    fn current_subject(&self) -> Option<&str>;

    /// End the current session.
    fn logout(&mut self) -> Result<()>;

    /// Current subject or `NotLoggedIn`.
    fn require_subject(&self) -> Result<&str> {
        self.current_subject().ok_or(AdminError::NotLoggedIn)
    }
}

/// Where a session survives restarts.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Session kept in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.lock().expect("session lock").clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.session.lock().expect("session lock") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock().expect("session lock") = None;
        Ok(())
    }
}

/// Session stored as JSON in a file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", self.path.display(), err);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Hex SHA-256 digest of a password, the form accepted as `sha256:<hex>`.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn password_matches(configured: &str, entered: &str) -> bool {
    if configured.is_empty() {
        return false;
    }
    match configured.strip_prefix("sha256:") {
        Some(digest) => digest.eq_ignore_ascii_case(&hash_password(entered)),
        None => configured == entered,
    }
}

/// Identity provider backed by the configured subject passwords.
pub struct PasswordIdentity<S: SessionStore> {
    passwords: BTreeMap<String, String>,
    store: S,
    current: Option<Session>,
}

impl<S: SessionStore> PasswordIdentity<S> {
    /// Restore any stored session whose subject is still configured.
    pub fn new(config: &AdminConfig, store: S) -> Result<Self> {
        let passwords = config.subject_passwords.clone();
        let current = store
            .load()?
            .filter(|session| passwords.contains_key(&session.subject));
        if let Some(ref session) = current {
            tracing::info!("Restored session for subject {}", session.subject);
        }

        Ok(Self {
            passwords,
            store,
            current,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }
}

impl<S: SessionStore> IdentityProvider for PasswordIdentity<S> {
    fn login(&mut self, subject: &str, password: &str) -> Result<Session> {
        let accepted = self
            .passwords
            .get(subject)
            .is_some_and(|configured| password_matches(configured, password));
        if !accepted {
            tracing::warn!("Rejected login for subject {}", subject);
            return Err(AdminError::InvalidCredentials);
        }

        let session = Session {
            subject: subject.to_string(),
            logged_in_at: Utc::now(),
        };
        self.store.save(&session)?;
        self.current = Some(session.clone());
        tracing::info!("Logged in as {}", subject);
        Ok(session)
    }

    fn current_subject(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.subject.as_str())
    }

    fn logout(&mut self) -> Result<()> {
        if let Some(session) = self.current.take() {
            tracing::info!("Logged out of {}", session.subject);
        }
        self.store.clear()
    }
}
