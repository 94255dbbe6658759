//! Admin configuration loaded from the environment.
//!
//! Each subject has one shared password, read from `<SUBJECT>_PASSWORD`
//! (for example `MATH_PASSWORD`). A value of the form `sha256:<hex>` is
//! compared against the digest of the entered password instead of the
//! password itself.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::catalog::SUBJECTS;

/// Environment variable overriding where the session is persisted.
pub const SESSION_FILE_VAR: &str = "ADMIN_SESSION_FILE";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Subject name -> configured password (plain or `sha256:` digest).
    pub subject_passwords: BTreeMap<String, String>,
    pub session_file: Option<PathBuf>,
    /// `RUST_LOG` directives for the tracing subscriber.
    pub log_filter: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            subject_passwords: BTreeMap::new(),
            session_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AdminConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let subject_passwords = SUBJECTS
            .iter()
            .filter_map(|subject| {
                let password = lookup(&password_var(subject))?;
                if password.is_empty() {
                    None
                } else {
                    Some((subject.to_string(), password))
                }
            })
            .collect();

        let session_file = lookup(SESSION_FILE_VAR)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let log_filter = lookup("RUST_LOG")
            .filter(|filter| !filter.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            subject_passwords,
            session_file,
            log_filter,
        }
    }

    /// Session file path: the configured one, else under the user's local
    /// data directory.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join("quiz-admin").join("session.json"))
        })
    }
}

/// `Math` -> `MATH_PASSWORD`.
pub fn password_var(subject: &str) -> String {
    format!("{}_PASSWORD", subject.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_password_var() {
        assert_eq!(password_var("Math"), "MATH_PASSWORD");
        assert_eq!(password_var("SAT"), "SAT_PASSWORD");
    }

    #[test]
    fn test_reads_subject_passwords() {
        let config = AdminConfig::from_lookup(lookup_from(&[
            ("MATH_PASSWORD", "pi"),
            ("PHYSICS_PASSWORD", ""),
            ("ART_PASSWORD", "ignored"),
        ]));
        assert_eq!(config.subject_passwords.len(), 1);
        assert_eq!(config.subject_passwords["Math"], "pi");
        assert_eq!(config.session_file, None);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_log_filter_comes_from_config() {
        let config = AdminConfig::from_lookup(lookup_from(&[("RUST_LOG", "quiz_admin=debug")]));
        assert_eq!(config.log_filter, "quiz_admin=debug");
        assert_eq!(AdminConfig::default().log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_session_file_override() {
        let config =
            AdminConfig::from_lookup(lookup_from(&[(SESSION_FILE_VAR, "/tmp/session.json")]));
        assert_eq!(
            config.session_path(),
            Some(PathBuf::from("/tmp/session.json"))
        );
    }
}
