use tracing::{debug, error};

use crate::error::{Result, SwordError};
use crate::location::LocationResolver;
use crate::models::{
    CollectionTarget, DepositDescription, DepositTarget, ItemTarget, NegotiationConfig,
};

/// Builds the deposit offer for a target from its metadata and a
/// configuration snapshot.
#[derive(Debug, Clone)]
pub struct NegotiationEngine<R> {
    resolver: R,
}

impl<R: LocationResolver> NegotiationEngine<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Entry point for targets whose kind is only known at runtime. Anything
    /// but a collection is rejected before a location is resolved.
    pub fn negotiate(
        &self,
        target: &DepositTarget,
        config: &NegotiationConfig,
    ) -> Result<DepositDescription> {
        match target {
            DepositTarget::Collection(col) => self.describe_collection(col, config),
            other => {
                error!(
                    target_id = %other.id(),
                    kind = %other.kind(),
                    "negotiation requested for an object that is not a collection"
                );
                Err(SwordError::TypeMismatch {
                    id: other.id().to_string(),
                    kind: other.kind(),
                })
            }
        }
    }

    pub fn describe_collection(
        &self,
        col: &CollectionTarget,
        config: &NegotiationConfig,
    ) -> Result<DepositDescription> {
        let location = self.resolver.deposit_location(&col.id)?;

        let sub_service = if config.expose_items {
            Some(self.resolver.sub_service_location(&col.id)?)
        } else {
            None
        };

        let description = DepositDescription {
            location,
            title: present(&col.name),
            policy: present(&col.license),
            dc_abstract: present(&col.short_description),
            mediation: config.mediation,
            accepts: config.accepts.clone(),
            accept_packaging: config.accept_packaging.clone(),
            sub_service,
        };

        debug!(target_id = %col.id, "created ATOM collection for collection");
        Ok(description)
    }

    pub fn describe_item(
        &self,
        item: &ItemTarget,
        config: &NegotiationConfig,
    ) -> Result<DepositDescription> {
        let description = DepositDescription {
            location: self.resolver.deposit_location(&item.id)?,
            title: present(&item.title),
            policy: None,
            dc_abstract: present(&item.description),
            mediation: config.mediation,
            accepts: config.accepts.clone(),
            accept_packaging: config.accept_packaging.clone(),
            sub_service: None,
        };

        debug!(target_id = %item.id, "created ATOM collection for item");
        Ok(description)
    }
}

// Null and "" are both absent
fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}
