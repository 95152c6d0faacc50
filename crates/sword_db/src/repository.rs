use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use sword_core::accessor::RepositoryAccessor;
use sword_core::models::{ItemTarget, ObjectKind, TargetId};
use sword_core::{Result, SwordError};

#[derive(Debug, FromRow)]
struct CollectionRow {
    name: Option<String>,
    short_description: Option<String>,
    license: Option<String>,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    handle: String,
    title: Option<String>,
    description: Option<String>,
}

pub struct TargetQuery;

impl TargetQuery {
    pub const KIND_BY_HANDLE: &'static str = r#"
        SELECT kind FROM dspace_objects WHERE handle = $1
    "#;

    pub const COLLECTION_BY_HANDLE: &'static str = r#"
        SELECT c.name, c.short_description, c.license
        FROM collections c
        JOIN dspace_objects o ON o.uuid = c.uuid
        WHERE o.handle = $1
    "#;

    pub const ELIGIBLE_ITEMS: &'static str = r#"
        SELECT o.handle, i.title, i.description
        FROM items i
        JOIN dspace_objects o ON o.uuid = i.uuid
        JOIN dspace_objects c ON c.uuid = i.owning_collection
        WHERE c.handle = $1
          AND i.in_archive
          AND NOT i.withdrawn
        ORDER BY o.handle ASC
    "#;
}

/// Read-only deposit-target lookups against the repository database.
#[derive(Clone)]
pub struct PgRepositoryAccessor {
    pool: PgPool,
}

impl PgRepositoryAccessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn collection_row(&self, target: &TargetId) -> Result<Option<CollectionRow>> {
        sqlx::query_as::<_, CollectionRow>(TargetQuery::COLLECTION_BY_HANDLE)
            .bind(target.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SwordError::upstream("collection metadata lookup", e))
    }
}

#[async_trait]
impl RepositoryAccessor for PgRepositoryAccessor {
    async fn object_kind(&self, target: &TargetId) -> Result<Option<ObjectKind>> {
        let kind: Option<String> = sqlx::query_scalar(TargetQuery::KIND_BY_HANDLE)
            .bind(target.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SwordError::upstream("object kind lookup", e))?;

        kind.map(|k| k.parse::<ObjectKind>())
            .transpose()
            .map_err(|e| SwordError::upstream("object kind lookup", e))
    }

    async fn name(&self, target: &TargetId) -> Result<Option<String>> {
        Ok(self.collection_row(target).await?.and_then(|row| row.name))
    }

    async fn license_text(&self, target: &TargetId) -> Result<Option<String>> {
        Ok(self.collection_row(target).await?.and_then(|row| row.license))
    }

    async fn short_description(&self, target: &TargetId) -> Result<Option<String>> {
        Ok(self
            .collection_row(target)
            .await?
            .and_then(|row| row.short_description))
    }

    async fn deposit_eligible_items(&self, collection: &TargetId) -> Result<Vec<ItemTarget>> {
        let rows = sqlx::query_as::<_, ItemRow>(TargetQuery::ELIGIBLE_ITEMS)
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SwordError::upstream("deposit-eligible item listing", e))?;

        Ok(rows
            .into_iter()
            .map(|row| ItemTarget {
                id: TargetId::new(row.handle),
                title: row.title,
                description: row.description,
            })
            .collect())
    }
}
