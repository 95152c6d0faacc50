use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use sword_core::models::TargetId;

use super::{build_service, OutputFormat};
use crate::config::Config;

#[derive(Debug, Args)]
pub struct CollectionArgs {
    /// Identifier (handle) of the collection to describe
    #[arg(short, long)]
    pub id: String,

    /// Read repository objects from a TOML fixture instead of the database
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Xml)]
    pub format: OutputFormat,
}

pub async fn execute(config: Config, args: CollectionArgs) -> Result<()> {
    let service = build_service(&config, args.fixture.as_deref()).await?;
    let id = TargetId::new(args.id);

    let description = service
        .collection_document(&id)
        .await
        .with_context(|| format!("Failed to negotiate collection {}", id))?;

    let rendered = match args.format {
        OutputFormat::Xml => description.to_xml()?,
        OutputFormat::Json => description.to_json()?,
    };
    println!("{}", rendered);
    Ok(())
}
