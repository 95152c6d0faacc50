use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ItemTarget, ObjectKind, TargetId};

pub mod memory;

pub use memory::InMemoryRepository;

/// Read-only view of the repository's content layer used during
/// negotiation. Implementations map their own failures to
/// `SwordError::UpstreamUnavailable`.
#[async_trait]
pub trait RepositoryAccessor: Send + Sync {
    /// `None` when no object has this identifier.
    async fn object_kind(&self, target: &TargetId) -> Result<Option<ObjectKind>>;

    async fn name(&self, target: &TargetId) -> Result<Option<String>>;

    async fn license_text(&self, target: &TargetId) -> Result<Option<String>>;

    async fn short_description(&self, target: &TargetId) -> Result<Option<String>>;

    /// Archived, non-withdrawn items owned by the collection, ordered by id.
    async fn deposit_eligible_items(&self, collection: &TargetId) -> Result<Vec<ItemTarget>>;

    async fn is_container_kind(&self, target: &TargetId) -> Result<bool> {
        Ok(self.object_kind(target).await? == Some(ObjectKind::Collection))
    }
}
