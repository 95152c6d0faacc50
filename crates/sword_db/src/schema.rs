use rust_embed::RustEmbed;
use sqlx::{Executor, PgPool};
use std::str;
use tracing::info;

use crate::error::{Error, Result};

#[derive(RustEmbed)]
#[folder = "schema/"]
struct SchemaAssets;

const BUILD_ORDER: &str = "00_build_order.sql";

/// Reads the build order and applies all SQL files in a single transaction.
pub async fn rebuild_database(pool: &PgPool) -> Result<()> {
    let script = assemble_script()?;

    let mut tx = pool.begin().await?;
    (&mut *tx).execute(script.as_str()).await?;
    tx.commit().await?;

    Ok(())
}

/// Drops every table in the public schema.
pub async fn reset_schema(pool: &PgPool) -> Result<()> {
    pool.execute("DROP SCHEMA public CASCADE; CREATE SCHEMA public;")
        .await?;
    Ok(())
}

/// Expands the `-- @include` directives of the build order into one script.
pub fn assemble_script() -> Result<String> {
    let manifest = get_file_content(BUILD_ORDER)?;

    let mut full_script = String::new();
    for line in manifest.lines() {
        let trimmed = line.trim();

        if let Some(path) = parse_include_directive(trimmed) {
            info!(file = path, "including schema file");
            full_script.push_str(&get_file_content(path)?);
            full_script.push('\n');
        } else if !trimmed.starts_with("--") {
            full_script.push_str(line);
            full_script.push('\n');
        }
    }
    Ok(full_script)
}

fn get_file_content(path: &str) -> Result<String> {
    let file = SchemaAssets::get(path)
        .ok_or_else(|| Error::Schema(format!("Missing schema file: {}", path)))?;
    str::from_utf8(file.data.as_ref())
        .map(str::to_string)
        .map_err(|e| Error::Schema(format!("{} is not UTF-8: {}", path, e)))
}

fn parse_include_directive(line: &str) -> Option<&str> {
    if line.starts_with("--") && line.contains("@include") {
        line.split_whitespace().last()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_directives_are_recognised() {
        assert_eq!(
            parse_include_directive("-- @include tables/02_collections.sql"),
            Some("tables/02_collections.sql")
        );
        assert_eq!(parse_include_directive("-- plain comment"), None);
        assert_eq!(parse_include_directive("SELECT 1;"), None);
    }

    #[test]
    fn script_applies_tables_in_dependency_order() {
        let script = assemble_script().unwrap();
        let objects = script.find("CREATE TABLE IF NOT EXISTS dspace_objects").unwrap();
        let collections = script.find("CREATE TABLE IF NOT EXISTS collections").unwrap();
        let items = script.find("CREATE TABLE IF NOT EXISTS items").unwrap();
        assert!(objects < collections && collections < items);
        assert!(!script.contains("@include"));
    }
}
