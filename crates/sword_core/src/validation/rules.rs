use std::collections::HashSet;
use url::Url;

use crate::config::{PackagingFormat, SwordConfiguration};
use crate::location::validate_identifier;
use crate::validation::{Severity, ValidationError, ValidationRule};

// Every packaging list in the configuration, labelled for reporting
fn packaging_lists(config: &SwordConfiguration) -> Vec<(String, &[PackagingFormat])> {
    let mut lists = vec![
        ("accept_packaging".to_string(), config.accept_packaging.as_slice()),
        (
            "item_accept_packaging".to_string(),
            config.item_accept_packaging.as_slice(),
        ),
    ];
    let mut keys: Vec<_> = config.collection_packaging.keys().collect();
    keys.sort();
    for key in keys {
        lists.push((
            format!("collection_packaging.{}", key),
            config.collection_packaging[key].as_slice(),
        ));
    }
    lists
}

// =========================================================================
// RULE: SWORD-001
// "Deposit and service document base URLs must be absolute http(s) URLs
//  with no query or fragment"
// =========================================================================
pub struct RuleBaseUrls;

impl ValidationRule for RuleBaseUrls {
    fn rule_id(&self) -> &str { "SWORD-001" }

    fn check(&self, config: &SwordConfiguration) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (key, value) in [
            ("deposit_url", &config.deposit_url),
            ("servicedocument_url", &config.servicedocument_url),
        ] {
            let problem = match Url::parse(value) {
                Ok(u) if !matches!(u.scheme(), "http" | "https") => {
                    Some("is not an absolute http(s) URL")
                }
                Ok(u) if u.query().is_some() || u.fragment().is_some() => {
                    Some("must not carry a query or fragment")
                }
                Ok(_) => None,
                Err(_) => Some("is not an absolute http(s) URL"),
            };
            if let Some(problem) = problem {
                errors.push(ValidationError {
                    code: self.rule_id().to_string(),
                    severity: Severity::Error,
                    message: format!("{} '{}' {}", key, value, problem),
                    target: Some(key.to_string()),
                });
            }
        }
        errors
    }
}

// =========================================================================
// RULE: SWORD-002
// "Packaging quality values should lie within [0.0, 1.0]"
// Weights are advertised as configured; this only reports them.
// =========================================================================
pub struct RuleQualityRange;

impl ValidationRule for RuleQualityRange {
    fn rule_id(&self) -> &str { "SWORD-002" }

    fn check(&self, config: &SwordConfiguration) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (label, formats) in packaging_lists(config) {
            for f in formats {
                if !f.q.is_finite() || !(0.0..=1.0).contains(&f.q) {
                    errors.push(ValidationError {
                        code: self.rule_id().to_string(),
                        severity: Severity::Warning,
                        message: format!(
                            "q={} for '{}' is outside 0.0..=1.0 and will be advertised unchanged",
                            f.q, f.identifier
                        ),
                        target: Some(label.clone()),
                    });
                }
            }
        }
        errors
    }
}

// =========================================================================
// RULE: SWORD-003
// "Packaging identifiers should be unique within a list"
// =========================================================================
pub struct RuleDuplicatePackaging;

impl ValidationRule for RuleDuplicatePackaging {
    fn rule_id(&self) -> &str { "SWORD-003" }

    fn check(&self, config: &SwordConfiguration) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (label, formats) in packaging_lists(config) {
            let mut seen = HashSet::new();
            for f in formats {
                if !seen.insert(f.identifier.as_str()) {
                    errors.push(ValidationError {
                        code: self.rule_id().to_string(),
                        severity: Severity::Warning,
                        message: format!(
                            "'{}' is listed more than once; the last entry wins",
                            f.identifier
                        ),
                        target: Some(label.clone()),
                    });
                }
            }
        }
        errors
    }
}

// =========================================================================
// RULE: SWORD-004
// "Accepted content types must look like media types"
// =========================================================================
pub struct RuleAcceptedTypes;

impl ValidationRule for RuleAcceptedTypes {
    fn rule_id(&self) -> &str { "SWORD-004" }

    fn check(&self, config: &SwordConfiguration) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (label, accepts) in [("accepts", &config.accepts), ("item_accepts", &config.item_accepts)] {
            for accept in accepts {
                let trimmed = accept.trim();
                let well_formed = trimmed
                    .split_once('/')
                    .map(|(kind, sub)| !kind.is_empty() && !sub.is_empty())
                    .unwrap_or(false);
                if !well_formed {
                    errors.push(ValidationError {
                        code: self.rule_id().to_string(),
                        severity: Severity::Error,
                        message: format!("'{}' is not a media type", accept),
                        target: Some(label.to_string()),
                    });
                }
            }
        }
        errors
    }
}

// =========================================================================
// RULE: SWORD-005
// "Per-collection packaging keys must be usable identifiers"
// =========================================================================
pub struct RuleOverrideKeys;

impl ValidationRule for RuleOverrideKeys {
    fn rule_id(&self) -> &str { "SWORD-005" }

    fn check(&self, config: &SwordConfiguration) -> Vec<ValidationError> {
        let mut keys: Vec<_> = config.collection_packaging.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|key| validate_identifier(key).err().map(|e| (key, e)))
            .map(|(key, e)| ValidationError {
                code: self.rule_id().to_string(),
                severity: Severity::Warning,
                message: format!("override will never match a collection: {}", e),
                target: Some(format!("collection_packaging.{}", key)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(deposit_url: &str, servicedocument_url: &str) -> SwordConfiguration {
        SwordConfiguration::from_toml_str(&format!(
            "deposit_url = \"{}\"\nservicedocument_url = \"{}\"\n",
            deposit_url, servicedocument_url
        ))
        .unwrap()
    }

    #[test]
    fn base_urls_with_query_or_fragment_are_errors() {
        let findings = RuleBaseUrls.check(&config(
            "https://repo.example.org/sword/deposit?tenant=a",
            "https://repo.example.org/sd#frag",
        ));
        let targets: Vec<_> = findings.iter().map(|f| f.target.as_deref()).collect();
        assert_eq!(targets, vec![Some("deposit_url"), Some("servicedocument_url")]);
        assert!(findings
            .iter()
            .all(|f| f.severity == Severity::Error && f.message.contains("query or fragment")));
    }

    #[test]
    fn plain_base_urls_pass() {
        let findings = RuleBaseUrls.check(&config(
            "https://repo.example.org/sword/deposit/",
            "http://repo.example.org/sword/servicedocument",
        ));
        assert!(findings.is_empty());
    }
}
