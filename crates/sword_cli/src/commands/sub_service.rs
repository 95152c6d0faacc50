use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use sword_core::models::TargetId;

use super::build_service;
use crate::config::Config;

#[derive(Debug, Args)]
pub struct SubServiceArgs {
    /// Identifier (handle) of the collection whose items should be listed
    #[arg(short, long)]
    pub id: String,

    /// Read repository objects from a TOML fixture instead of the database
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

pub async fn execute(config: Config, args: SubServiceArgs) -> Result<()> {
    let service = build_service(&config, args.fixture.as_deref()).await?;
    let id = TargetId::new(args.id);

    let document = service
        .sub_service_document(&id)
        .await
        .with_context(|| format!("Failed to build sub-service document for {}", id))?;

    println!("{}", document.to_xml()?);
    Ok(())
}
