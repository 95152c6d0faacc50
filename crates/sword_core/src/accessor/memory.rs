use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::RepositoryAccessor;
use crate::error::{Result, SwordError};
use crate::models::{CollectionTarget, ItemTarget, ObjectKind, TargetId};

/// Fixture-backed repository for tests and offline runs of the CLI.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    communities: Vec<TargetId>,
    collections: BTreeMap<TargetId, CollectionTarget>,
    items: BTreeMap<TargetId, FixtureItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureItem {
    #[serde(flatten)]
    item: ItemTarget,
    collection: TargetId,
    #[serde(default = "archived")]
    in_archive: bool,
    #[serde(default)]
    withdrawn: bool,
}

fn archived() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    community: Vec<CommunityEntry>,
    #[serde(default)]
    collection: Vec<CollectionTarget>,
    #[serde(default)]
    item: Vec<FixtureItem>,
}

#[derive(Debug, Deserialize)]
struct CommunityEntry {
    id: TargetId,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_community(mut self, id: impl Into<TargetId>) -> Self {
        self.communities.push(id.into());
        self
    }

    pub fn with_collection(mut self, col: CollectionTarget) -> Self {
        self.collections.insert(col.id.clone(), col);
        self
    }

    pub fn with_item(mut self, collection: impl Into<TargetId>, item: ItemTarget) -> Self {
        self.items.insert(
            item.id.clone(),
            FixtureItem {
                item,
                collection: collection.into(),
                in_archive: true,
                withdrawn: false,
            },
        );
        self
    }

    /// Loads `[[community]]`, `[[collection]]` and `[[item]]` tables.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let fixture: Fixture = toml::from_str(raw)
            .map_err(|e| SwordError::Configuration(format!("Invalid fixture: {}", e)))?;

        let mut repo = Self::new();
        for c in fixture.community {
            repo = repo.with_community(c.id);
        }
        for col in fixture.collection {
            repo = repo.with_collection(col);
        }
        for item in fixture.item {
            repo.items.insert(item.item.id.clone(), item);
        }
        Ok(repo)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SwordError::Configuration(format!("Failed to read fixture {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    fn collection(&self, target: &TargetId) -> Option<&CollectionTarget> {
        self.collections.get(target)
    }
}

#[async_trait]
impl RepositoryAccessor for InMemoryRepository {
    async fn object_kind(&self, target: &TargetId) -> Result<Option<ObjectKind>> {
        if self.collections.contains_key(target) {
            Ok(Some(ObjectKind::Collection))
        } else if self.items.contains_key(target) {
            Ok(Some(ObjectKind::Item))
        } else if self.communities.contains(target) {
            Ok(Some(ObjectKind::Community))
        } else {
            Ok(None)
        }
    }

    async fn name(&self, target: &TargetId) -> Result<Option<String>> {
        Ok(self.collection(target).and_then(|c| c.name.clone()))
    }

    async fn license_text(&self, target: &TargetId) -> Result<Option<String>> {
        Ok(self.collection(target).and_then(|c| c.license.clone()))
    }

    async fn short_description(&self, target: &TargetId) -> Result<Option<String>> {
        Ok(self.collection(target).and_then(|c| c.short_description.clone()))
    }

    async fn deposit_eligible_items(&self, collection: &TargetId) -> Result<Vec<ItemTarget>> {
        Ok(self
            .items
            .values()
            .filter(|i| &i.collection == collection && i.in_archive && !i.withdrawn)
            .map(|i| i.item.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        [[community]]
        id = "com-1"

        [[collection]]
        id = "col-42"
        name = "Physics Papers"
        license = ""
        short_description = "Preprints in physics"

        [[item]]
        id = "item-2"
        collection = "col-42"
        title = "Second"

        [[item]]
        id = "item-1"
        collection = "col-42"
        title = "First"

        [[item]]
        id = "item-3"
        collection = "col-42"
        withdrawn = true
    "#;

    #[tokio::test]
    async fn fixture_kinds_and_metadata() {
        let repo = InMemoryRepository::from_toml_str(FIXTURE).unwrap();
        let col = TargetId::from("col-42");

        assert_eq!(repo.object_kind(&col).await.unwrap(), Some(ObjectKind::Collection));
        assert_eq!(
            repo.object_kind(&TargetId::from("com-1")).await.unwrap(),
            Some(ObjectKind::Community)
        );
        assert_eq!(repo.object_kind(&TargetId::from("nope")).await.unwrap(), None);

        assert!(repo.is_container_kind(&col).await.unwrap());
        assert!(!repo.is_container_kind(&TargetId::from("item-1")).await.unwrap());

        assert_eq!(repo.name(&col).await.unwrap().as_deref(), Some("Physics Papers"));
        assert_eq!(repo.license_text(&col).await.unwrap().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn withdrawn_items_are_not_deposit_targets() {
        let repo = InMemoryRepository::from_toml_str(FIXTURE).unwrap();
        let items = repo
            .deposit_eligible_items(&TargetId::from("col-42"))
            .await
            .unwrap();

        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["item-1", "item-2"]);
    }
}
