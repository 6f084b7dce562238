use clap::{Args, Subcommand};
use foodstock_core::{FileStorage, SessionStore};
use std::io::{self, Write};

use super::{require_login, OutputFormat};

#[derive(Args)]
pub struct LoginCommand {
    /// Username (prompted when omitted)
    #[arg(long, short)]
    username: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, short)]
    password: Option<String>,
}

impl LoginCommand {
    pub fn run(&self, storage: &FileStorage) -> Result<(), Box<dyn std::error::Error>> {
        let mut session = SessionStore::open(storage.clone())?;

        let username = match &self.username {
            Some(username) => username.clone(),
            None => prompt("Username")?,
        };
        let password = match &self.password {
            Some(password) => password.clone(),
            None => prompt("Password")?,
        };

        let user = session.try_login(username.trim(), &password)?;
        println!("Logged in as {} ({})", user.full_name, user.username);
        Ok(())
    }
}

pub fn logout(storage: &FileStorage) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = SessionStore::open(storage.clone())?;

    if !session.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }

    session.logout()?;
    println!("Logged out");
    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show the signed-in user
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Change the display name
    Update {
        /// New full name
        #[arg(long)]
        full_name: String,
    },
}

impl ProfileCommand {
    pub fn run(&self, storage: &FileStorage) -> Result<(), Box<dyn std::error::Error>> {
        let (mut session, user) = require_login(storage)?;

        match &self.command {
            ProfileSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        // The password never leaves the session file
                        let profile = serde_json::json!({
                            "id": user.id,
                            "username": user.username,
                            "fullName": user.full_name,
                        });
                        println!("{}", serde_json::to_string_pretty(&profile)?);
                    }
                    OutputFormat::Text => {
                        println!("Profile");
                        println!("=======\n");
                        println!("ID:        {}", user.id);
                        println!("Username:  {}", user.username);
                        println!("Full name: {}", user.full_name);
                    }
                }
                Ok(())
            }

            ProfileSubcommand::Update { full_name } => {
                let full_name = full_name.trim();
                if full_name.is_empty() {
                    return Err("Full name cannot be empty".into());
                }

                session.update_user(user.with_full_name(full_name))?;
                println!("Profile updated: {}", full_name);
                Ok(())
            }
        }
    }
}
