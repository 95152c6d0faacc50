// sword_cli/src/main.rs
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sword_cli::commands;
use sword_cli::config::Config;

#[derive(Parser)]
#[command(name = "sword_forge")]
#[command(about = "SWORD deposit collection negotiation toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ATOM collection a depositing client would see
    Collection(commands::collection::CollectionArgs),

    /// Print the sub-service document listing a collection's items
    SubService(commands::sub_service::SubServiceArgs),

    /// Check a sword.toml for suspicious or invalid settings
    ValidateConfig(commands::validate::ValidateArgs),

    /// Rebuild the database schema from embedded assets
    Rebuild(commands::rebuild::RebuildArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Documents go to stdout; keep logs on stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Load Config (Fails fast if invalid)
    let config = Config::from_env()?;

    // 2. Parse arguments and route to the correct command
    let cli = Cli::parse();

    match cli.command {
        Commands::Collection(args) => commands::collection::execute(config, args).await?,
        Commands::SubService(args) => commands::sub_service::execute(config, args).await?,
        Commands::ValidateConfig(args) => commands::validate::execute(config, args)?,
        Commands::Rebuild(args) => commands::rebuild::execute(config, args).await?,
    }

    Ok(())
}
