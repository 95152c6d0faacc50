use tracing::info;

use sword_core::config::ConfigurationProvider;
use sword_core::models::{
    CollectionTarget, DepositDescription, DepositTarget, ItemTarget, ObjectKind, TargetId,
};
use sword_core::{Result, SwordError};

use crate::SwordService;

impl SwordService {
    /// Narrows an identifier to a typed target. Only collections are
    /// hydrated with metadata; other kinds carry their identity alone.
    pub async fn load_target(&self, id: &TargetId) -> Result<DepositTarget> {
        let kind = self
            .upstream("object kind lookup", self.repository.object_kind(id))
            .await?
            .ok_or_else(|| SwordError::NotFound { id: id.to_string() })?;

        let target = match kind {
            ObjectKind::Collection => {
                let name = self.upstream("name lookup", self.repository.name(id)).await?;
                let license = self
                    .upstream("license text lookup", self.repository.license_text(id))
                    .await?;
                let short_description = self
                    .upstream(
                        "short description lookup",
                        self.repository.short_description(id),
                    )
                    .await?;

                DepositTarget::Collection(CollectionTarget {
                    id: id.clone(),
                    name,
                    license,
                    short_description,
                })
            }
            ObjectKind::Community => DepositTarget::Community(id.clone()),
            ObjectKind::Item => DepositTarget::Item(ItemTarget {
                id: id.clone(),
                title: None,
                description: None,
            }),
        };
        Ok(target)
    }

    /// The ATOM collection a client sees when asking how to deposit into `id`.
    pub async fn collection_document(&self, id: &TargetId) -> Result<DepositDescription> {
        let target = self.load_target(id).await?;
        let snapshot = self.config.collection_snapshot(id);

        let description = self.engine().negotiate(&target, &snapshot)?;
        info!(
            target_id = %id,
            accepts = description.accepts.len(),
            packaging = description.accept_packaging.len(),
            sub_service = description.sub_service.is_some(),
            "negotiated deposit collection"
        );
        Ok(description)
    }
}
