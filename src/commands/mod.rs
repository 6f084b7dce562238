mod auth;
mod config_cmd;
mod food;
mod stats;
mod theme;

pub use auth::{logout, LoginCommand, ProfileCommand};
pub use config_cmd::ConfigCommand;
pub use food::FoodCommand;
pub use stats::StatsCommand;
pub use theme::ThemeCommand;

use clap::ValueEnum;
use foodstock_core::{FileStorage, SessionStore, User};
use std::io::{self, Write};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Loads the session and returns the signed-in user.
pub fn require_login(
    storage: &FileStorage,
) -> Result<(SessionStore<FileStorage>, User), Box<dyn std::error::Error>> {
    let session = SessionStore::open(storage.clone())?;
    let user = session
        .require_user()
        .map_err(|_| "Not logged in. Run `foodstock login` first.")?
        .clone();
    Ok((session, user))
}

/// Prints `question [y/N]` and reads the answer from stdin.
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Shortens `text` to `width` characters, ending in "..." when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
