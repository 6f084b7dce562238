use clap::{Parser, Subcommand};
use foodstock_core::FileStorage;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{ConfigCommand, FoodCommand, LoginCommand, ProfileCommand, StatsCommand, ThemeCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "foodstock")]
#[command(version)]
#[command(about = "A food inventory manager", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a built-in account
    Login(LoginCommand),

    /// Sign out
    Logout,

    /// Show or edit the signed-in user
    Profile(ProfileCommand),

    /// Dashboard numbers and recent foods
    Stats(StatsCommand),

    /// Manage foods
    Food(FoodCommand),

    /// Light, dark or system theme
    Theme(ThemeCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodstock=warn,foodstock_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for the config command
    let cli_config_path = cli.config.clone();

    // Load configuration
    let config = Config::load(cli.config)?;
    tracing::debug!("Data directory: {}", config.data_dir.value.display());

    let storage = FileStorage::new(config.data_dir.value.clone());

    match cli.command {
        Some(Commands::Login(cmd)) => cmd.run(&storage)?,
        Some(Commands::Logout) => commands::logout(&storage)?,
        Some(Commands::Profile(cmd)) => cmd.run(&storage)?,
        Some(Commands::Stats(cmd)) => cmd.run(&storage)?,
        Some(Commands::Food(cmd)) => cmd.run(&storage, config.page_size.value)?,
        Some(Commands::Theme(cmd)) => cmd.run(&storage, config.prefers_dark.value)?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
