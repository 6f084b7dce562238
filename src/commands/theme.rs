use clap::{Args, Subcommand};
use foodstock_core::{FileStorage, ThemeMode, ThemeStore};

#[derive(Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub command: ThemeSubcommand,
}

#[derive(Subcommand)]
pub enum ThemeSubcommand {
    /// Show the selected theme and what it resolves to
    Show,

    /// Select a theme
    Set {
        /// light, dark or system
        mode: String,
    },
}

impl ThemeCommand {
    pub fn run(
        &self,
        storage: &FileStorage,
        prefers_dark: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut store = ThemeStore::open(storage.clone())?;

        match &self.command {
            ThemeSubcommand::Show => {
                let mode = store.mode();
                let appearance = store.resolve(prefers_dark);
                if mode == ThemeMode::System {
                    println!("Theme: system (currently {})", appearance);
                } else {
                    println!("Theme: {}", mode);
                }
                Ok(())
            }

            ThemeSubcommand::Set { mode } => {
                let mode: ThemeMode = mode.parse().map_err(|e: String| e)?;
                store.set(mode)?;
                println!("Theme set to {} ({})", mode, store.resolve(prefers_dark));
                Ok(())
            }
        }
    }
}
