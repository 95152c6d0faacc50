use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable snapshot of what one target accepts, taken for a single
/// negotiation.
///
/// `accepts` keeps configuration order; clients read it as a preference
/// ranking. `accept_packaging` is a sorted map so emission order is stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NegotiationConfig {
    pub mediation: bool,
    pub accepts: Vec<String>,
    pub accept_packaging: BTreeMap<String, f32>,
    pub expose_items: bool,
}
