use anyhow::{Context, Result};
use clap::Args;

use sword_db::schema::{rebuild_database, reset_schema};

use super::connect;
use crate::config::Config;

#[derive(Debug, Args)]
pub struct RebuildArgs {
    /// DANGER: Drop existing tables before rebuilding?
    #[arg(long)]
    pub reset: bool,
}

pub async fn execute(config: Config, args: RebuildArgs) -> Result<()> {
    let pool = connect(&config).await?;
    println!("Rebuilding deposit-target schema...");

    if args.reset {
        println!("Reset requested. Dropping public schema...");
        reset_schema(&pool).await.context("Failed to drop schema")?;
    }

    rebuild_database(&pool).await.context("Failed to apply schema")?;

    println!("Schema applied successfully.");
    Ok(())
}
