pub mod collection;
pub mod rebuild;
pub mod sub_service;
pub mod validate;

use anyhow::{Context, Result};
use clap::ValueEnum;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;

use sword_core::accessor::{InMemoryRepository, RepositoryAccessor};
use sword_db::PgRepositoryAccessor;
use sword_service::SwordService;

use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Xml,
    Json,
}

pub async fn connect(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(config.database_url()?)
        .await
        .context("Failed to connect to the repository database")
}

/// Builds the service over a fixture file when given, otherwise over the
/// repository database.
pub async fn build_service(config: &Config, fixture: Option<&Path>) -> Result<SwordService> {
    let sword = config.load_sword_configuration()?;

    let repository: Arc<dyn RepositoryAccessor> = match fixture {
        Some(path) => Arc::new(InMemoryRepository::from_file(path)?),
        None => Arc::new(PgRepositoryAccessor::new(connect(config).await?)),
    };

    SwordService::new(repository, sword).context("Invalid SWORD configuration")
}
