use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod storage;

use commands::{ConfigCommand, DrinkCommand, IngredientCommand, UserCommand};
use config::Config;
use storage::open_inventory;

/// Environment variable holding the log filter
const LOG_ENV: &str = "BARAPP_LOG";

#[derive(Parser)]
#[command(name = "barapp")]
#[command(version)]
#[command(about = "Manage a bar's drinks, ingredients and users", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the drinks menu
    Drink(DrinkCommand),

    /// Manage ingredient stock
    Ingredient(IngredientCommand),

    /// Manage users
    User(UserCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays parseable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Drink(cmd)) => {
            let inventory = open_inventory(&config);
            cmd.run(&inventory.drinks).await?;
        }
        Some(Commands::Ingredient(cmd)) => {
            let inventory = open_inventory(&config);
            cmd.run(&inventory.ingredients).await?;
        }
        Some(Commands::User(cmd)) => {
            let inventory = open_inventory(&config);
            cmd.run(&inventory.users).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
