use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatherly::api::ApiClient;
use gatherly::commands::{ActivityCommand, ConfigCommand, ValuesCommand};
use gatherly::config::Config;
use gatherly::store::ActivityStore;

#[derive(Parser)]
#[command(name = "gatherly")]
#[command(version)]
#[command(about = "An activity planning CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage activities
    Activity(ActivityCommand),

    /// List the placeholder values resource
    Values(ValuesCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    // Remote-call failures are logged, not surfaced; make the log visible
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatherly=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Activity(cmd)) => {
            let api = ApiClient::new(config.server_url.clone());
            let mut store = ActivityStore::new(api);
            cmd.run(&mut store).await?;
        }
        Some(Commands::Values(cmd)) => {
            let api = ApiClient::new(config.server_url.clone());
            cmd.run(&api).await?;
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
