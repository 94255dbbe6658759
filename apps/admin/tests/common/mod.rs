//! Common test utilities for admin integration tests.
//!
//! Provides a logged-in identity over an in-memory session store and
//! sample bulk text resembling what admins paste from an LLM.

#![allow(dead_code)]

use quiz_admin::{AdminConfig, IdentityProvider, MemorySessionStore, PasswordIdentity};

pub const SUBJECT: &str = "Chemistry";
pub const PASSWORD: &str = "charlie123";

/// Config with a single subject password.
pub fn config() -> AdminConfig {
    let mut config = AdminConfig::default();
    config
        .subject_passwords
        .insert(SUBJECT.to_string(), PASSWORD.to_string());
    config
}

/// Identity already logged in as [`SUBJECT`].
pub fn logged_in() -> PasswordIdentity<MemorySessionStore> {
    let mut identity = PasswordIdentity::new(&config(), MemorySessionStore::default())
        .expect("memory session store");
    identity.login(SUBJECT, PASSWORD).expect("login");
    identity
}

/// Flashcards with chatty preamble, both separators and a multi-line back.
pub fn sample_flashcards() -> &'static str {
    "Sure! Here are some flashcards:\n\
     \n\
     Atomic number >> Number of protons in the nucleus\n\
     ---\n\
     Isotope :: Atoms of one element\n\
     with different numbers of neutrons\n\
     ---\n\
     Half-life >>\n\
     ---\n\
     Catalyst >> Speeds up a reaction without being consumed\n"
}

/// Questions mixing markers, one incomplete question in the middle.
pub fn sample_questions() -> &'static str {
    "Q: What is the chemical symbol for sodium?\n\
     a. S\n\
     b. Na <\n\
     c. So\n\
     ---\n\
     Question: Which gas is inert?\n\
     a. Oxygen\n\
     b. Hydrogen\n\
     ---\n\
     3. Balance the equation:\n\
     H2 + O2 -> H2O\n\
     How many H2 molecules are needed?\n\
     a. 1\n\
     b. 2 *\n\
     c. 3\n"
}
