//! Command-line front end for the quiz admin tools.
//!
//! Usage:
//!   quiz-admin parse <kind> [path]    - Print the parsed records of bulk text as JSON
//!   quiz-admin format <kind> [path]   - Rewrite bulk text in canonical form
//!   quiz-admin login <subject>        - Check a subject password and store the session
//!   quiz-admin whoami                 - Show the logged-in subject
//!   quiz-admin logout                 - Forget the stored session
//!
//! Reads stdin when no path is given.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bulk_core::{parse_flashcards, parse_questions, render_flashcards, render_questions, Document};
use clap::{Parser, Subcommand, ValueEnum};
use quiz_admin::{AdminConfig, FileSessionStore, IdentityProvider, PasswordIdentity};

#[derive(Parser)]
#[command(name = "quiz-admin", version, about = "Quiz content admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Flashcards,
    Questions,
}

#[derive(Subcommand)]
enum Command {
    /// Print the records parsed from bulk text as JSON
    Parse {
        kind: Kind,
        path: Option<PathBuf>,
    },
    /// Rewrite bulk text in canonical form, dropping anything that does not parse
    Format {
        kind: Kind,
        path: Option<PathBuf>,
    },
    /// Log in as a subject
    Login {
        subject: String,
        #[arg(long, env = "ADMIN_PASSWORD")]
        password: String,
    },
    /// Show the logged-in subject
    Whoami,
    /// Forget the stored session
    Logout,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Saved editor markup and plain text are both accepted.
fn plain_text(input: &str) -> String {
    Document::from_markup(input).plain_text()
}

fn identity(config: &AdminConfig) -> Result<PasswordIdentity<FileSessionStore>> {
    let path = config
        .session_path()
        .context("no data directory for the session file; set ADMIN_SESSION_FILE")?;
    Ok(PasswordIdentity::new(config, FileSessionStore::new(path))?)
}

fn main() -> Result<()> {
    // loads .env before clap reads ADMIN_PASSWORD
    let config = AdminConfig::from_env();
    quiz_admin::init_tracing(&config);
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { kind, path } => {
            let text = plain_text(&read_input(path.as_ref())?);
            let json = match kind {
                Kind::Flashcards => serde_json::to_string_pretty(&parse_flashcards(&text))?,
                Kind::Questions => serde_json::to_string_pretty(&parse_questions(&text))?,
            };
            println!("{}", json);
        }
        Command::Format { kind, path } => {
            let text = plain_text(&read_input(path.as_ref())?);
            let formatted = match kind {
                Kind::Flashcards => render_flashcards(&parse_flashcards(&text)),
                Kind::Questions => render_questions(&parse_questions(&text)),
            };
            println!("{}", formatted);
        }
        Command::Login { subject, password } => {
            let mut identity = identity(&config)?;
            identity.login(&subject, &password)?;
            println!("Logged in as {}", subject);
        }
        Command::Whoami => {
            let identity = identity(&config)?;
            match identity.current_subject() {
                Some(subject) => println!("{}", subject),
                None => println!("Not logged in"),
            }
        }
        Command::Logout => {
            identity(&config)?.logout()?;
            println!("Logged out");
        }
    }

    Ok(())
}
