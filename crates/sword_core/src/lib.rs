pub mod accessor;
pub mod atom;
pub mod config;
pub mod error;
pub mod location;
pub mod models;
pub mod negotiation;
pub mod validation;

pub use error::{ErrorClass, Result, SwordError};

use validation::{rules, ValidationEngine};

/// SWORD protocol version advertised in service documents.
pub const SWORD_VERSION: &str = "1.3";

pub fn get_standard_validator() -> ValidationEngine {
    ValidationEngine::new()
        .add_rule(rules::RuleBaseUrls)
        .add_rule(rules::RuleQualityRange)
        .add_rule(rules::RuleDuplicatePackaging)
        .add_rule(rules::RuleAcceptedTypes)
        .add_rule(rules::RuleOverrideKeys)
}
