pub mod deposit_description;
pub mod deposit_target;
pub mod negotiation_config;

pub use deposit_description::{DepositDescription, ServiceDocument, Workspace};
pub use deposit_target::{CollectionTarget, DepositTarget, ItemTarget, ObjectKind, TargetId};
pub use negotiation_config::NegotiationConfig;
