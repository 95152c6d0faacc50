use url::Url;

use crate::error::{Result, SwordError};
use crate::models::TargetId;

/// Computes the endpoints advertised for a deposit target.
pub trait LocationResolver {
    fn deposit_location(&self, target: &TargetId) -> Result<String>;
    fn sub_service_location(&self, target: &TargetId) -> Result<String>;
}

/// Joins target identifiers onto the deployment's deposit and
/// service-document base URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlManager {
    deposit_base: String,
    servicedocument_base: String,
}

impl UrlManager {
    pub fn new(deposit_url: &str, servicedocument_url: &str) -> Result<Self> {
        Ok(Self {
            deposit_base: parse_base("deposit_url", deposit_url)?,
            servicedocument_base: parse_base("servicedocument_url", servicedocument_url)?,
        })
    }

    fn join(&self, base: &str, target: &TargetId) -> Result<String> {
        validate_identifier(target.as_str())?;

        // Advertise the serialized form so non-ASCII and reserved characters
        // come out percent-encoded
        let joined = format!("{}/{}", base, target.as_str());
        let url = Url::parse(&joined)
            .map_err(|e| SwordError::invalid_identifier(target.as_str(), e.to_string()))?;
        Ok(url.to_string())
    }
}

impl LocationResolver for UrlManager {
    fn deposit_location(&self, target: &TargetId) -> Result<String> {
        self.join(&self.deposit_base, target)
    }

    fn sub_service_location(&self, target: &TargetId) -> Result<String> {
        self.join(&self.servicedocument_base, target)
    }
}

fn parse_base(key: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| SwordError::Configuration(format!("{} '{}' is not a URL: {}", key, raw, e)))?;
    if parsed.cannot_be_a_base() {
        return Err(SwordError::Configuration(format!(
            "{} '{}' cannot be used as a base URL",
            key, raw
        )));
    }
    // Identifiers are appended to the path; a query or fragment would swallow them
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(SwordError::Configuration(format!(
            "{} '{}' must not carry a query or fragment",
            key, raw
        )));
    }
    Ok(trimmed.to_string())
}

/// Rejects identifiers that would not survive being used as a path suffix.
pub fn validate_identifier(id: &str) -> Result<()> {
    let reject = |reason: &str| Err(SwordError::invalid_identifier(id, reason));

    if id.is_empty() {
        return reject("identifier is empty");
    }
    if let Some(c) = id
        .chars()
        .find(|&c| c.is_whitespace() || c.is_control() || matches!(c, '?' | '#' | '%' | '\\'))
    {
        return reject(&format!("identifier contains forbidden character {:?}", c));
    }
    if id.starts_with('/') || id.ends_with('/') {
        return reject("identifier must not start or end with '/'");
    }
    if id.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return reject("identifier contains an empty or relative path segment");
    }
    Ok(())
}
