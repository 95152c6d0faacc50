use tracing::info;

use sword_core::config::ConfigurationProvider;
use sword_core::models::{DepositTarget, ServiceDocument, TargetId, Workspace};
use sword_core::{Result, SwordError, SWORD_VERSION};

use crate::SwordService;

impl SwordService {
    /// Lists the archived items of a collection as individual deposit
    /// targets. The endpoint only exists while item exposure is enabled.
    pub async fn sub_service_document(&self, id: &TargetId) -> Result<ServiceDocument> {
        if !self.config.is_item_exposure_enabled() {
            return Err(SwordError::NotFound { id: id.to_string() });
        }

        let col = match self.load_target(id).await? {
            DepositTarget::Collection(col) => col,
            other => {
                return Err(SwordError::TypeMismatch {
                    id: other.id().to_string(),
                    kind: other.kind(),
                })
            }
        };

        let items = self
            .upstream(
                "deposit-eligible item listing",
                self.repository.deposit_eligible_items(&col.id),
            )
            .await?;

        let snapshot = self.config.item_snapshot();
        let collections = items
            .iter()
            .map(|item| self.engine().describe_item(item, &snapshot))
            .collect::<Result<Vec<_>>>()?;

        // Named after the collection; unnamed ones fall back to workspace_title
        let title = col
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.config.workspace_title.clone());

        info!(target_id = %id, items = collections.len(), "built sub-service document");

        Ok(ServiceDocument {
            version: SWORD_VERSION.to_string(),
            max_upload_size: self.config.max_upload_size,
            verbose: self.config.verbose,
            no_op: self.config.no_op,
            workspace: Workspace { title, collections },
        })
    }
}
