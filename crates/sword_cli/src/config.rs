use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use sword_core::config::SwordConfiguration;

#[derive(Clone, Debug)]
pub struct Config {
    pub sword_config: PathBuf,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env if present

        let db_max_connections = match env::var("SWORD_DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("SWORD_DB_MAX_CONNECTIONS '{}' is not a number", raw))?,
            Err(_) => 5,
        };

        Ok(Config {
            sword_config: env::var("SWORD_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("sword.toml")),

            database_url: env::var("DATABASE_URL").ok(),

            db_max_connections,
        })
    }

    pub fn database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set when no --fixture is given")
    }

    pub fn load_sword_configuration(&self) -> Result<SwordConfiguration> {
        SwordConfiguration::from_file(&self.sword_config)
            .with_context(|| format!("Failed to load {}", self.sword_config.display()))
    }
}
