//! ATOM Publishing Protocol / SWORD 1.3 rendering of deposit descriptions.
//!
//! The wire structs borrow from the domain models so that presence rules
//! stay with the models: an absent optional field is skipped, not emitted
//! as an empty element.

use quick_xml::se::to_string;
use serde::Serialize;

use crate::error::{Result, SwordError};
use crate::models::{DepositDescription, ServiceDocument};

pub const APP_NS: &str = "http://www.w3.org/2007/app";
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
pub const SWORD_NS: &str = "http://purl.org/net/sword/";
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Serialize)]
#[serde(rename = "app:collection")]
struct AtomCollection<'a> {
    // Namespace declarations, only written on the root element
    #[serde(rename = "@xmlns:app", skip_serializing_if = "Option::is_none")]
    xmlns_app: Option<&'static str>,
    #[serde(rename = "@xmlns:atom", skip_serializing_if = "Option::is_none")]
    xmlns_atom: Option<&'static str>,
    #[serde(rename = "@xmlns:sword", skip_serializing_if = "Option::is_none")]
    xmlns_sword: Option<&'static str>,
    #[serde(rename = "@xmlns:dcterms", skip_serializing_if = "Option::is_none")]
    xmlns_dcterms: Option<&'static str>,

    #[serde(rename = "@href")]
    href: &'a str,

    #[serde(rename = "atom:title", skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,

    #[serde(rename = "app:accept", skip_serializing_if = "Vec::is_empty")]
    accepts: Vec<&'a str>,

    #[serde(rename = "sword:acceptPackaging", skip_serializing_if = "Vec::is_empty")]
    accept_packaging: Vec<AcceptPackaging<'a>>,

    #[serde(rename = "sword:collectionPolicy", skip_serializing_if = "Option::is_none")]
    policy: Option<&'a str>,

    #[serde(rename = "dcterms:abstract", skip_serializing_if = "Option::is_none")]
    dc_abstract: Option<&'a str>,

    #[serde(rename = "sword:mediation")]
    mediation: bool,

    #[serde(rename = "sword:service", skip_serializing_if = "Option::is_none")]
    service: Option<&'a str>,
}

#[derive(Serialize)]
struct AcceptPackaging<'a> {
    #[serde(rename = "@q")]
    q: String,

    #[serde(rename = "$text")]
    identifier: &'a str,
}

#[derive(Serialize)]
#[serde(rename = "app:service")]
struct AtomService<'a> {
    #[serde(rename = "@xmlns:app")]
    xmlns_app: &'static str,
    #[serde(rename = "@xmlns:atom")]
    xmlns_atom: &'static str,
    #[serde(rename = "@xmlns:sword")]
    xmlns_sword: &'static str,
    #[serde(rename = "@xmlns:dcterms")]
    xmlns_dcterms: &'static str,

    #[serde(rename = "sword:version")]
    version: &'a str,

    #[serde(rename = "sword:verbose", skip_serializing_if = "Option::is_none")]
    verbose: Option<bool>,

    #[serde(rename = "sword:noOp", skip_serializing_if = "Option::is_none")]
    no_op: Option<bool>,

    #[serde(rename = "sword:maxUploadSize", skip_serializing_if = "Option::is_none")]
    max_upload_size: Option<u64>,

    #[serde(rename = "app:workspace")]
    workspace: AtomWorkspace<'a>,
}

#[derive(Serialize)]
struct AtomWorkspace<'a> {
    #[serde(rename = "atom:title")]
    title: &'a str,

    #[serde(rename = "app:collection", skip_serializing_if = "Vec::is_empty")]
    collections: Vec<AtomCollection<'a>>,
}

impl<'a> AtomCollection<'a> {
    fn new(d: &'a DepositDescription, root: bool) -> Self {
        let ns = |uri: &'static str| root.then_some(uri);
        Self {
            xmlns_app: ns(APP_NS),
            xmlns_atom: ns(ATOM_NS),
            xmlns_sword: ns(SWORD_NS),
            xmlns_dcterms: ns(DCTERMS_NS),
            href: &d.location,
            title: d.title.as_deref(),
            accepts: d.accepts.iter().map(String::as_str).collect(),
            accept_packaging: d
                .accept_packaging
                .iter()
                .map(|(identifier, q)| AcceptPackaging {
                    q: format_quality(*q),
                    identifier: identifier.as_str(),
                })
                .collect(),
            policy: d.policy.as_deref(),
            dc_abstract: d.dc_abstract.as_deref(),
            mediation: d.mediation,
            service: d.sub_service.as_deref(),
        }
    }
}

/// Whole weights keep one decimal ("1.0"); others use the shortest form.
pub fn format_quality(q: f32) -> String {
    if q.is_finite() && q.fract() == 0.0 {
        format!("{:.1}", q)
    } else {
        q.to_string()
    }
}

fn render<T: Serialize>(value: &T, what: &str) -> Result<String> {
    let body = to_string(value)
        .map_err(|e| SwordError::Serialization(format!("Failed to serialize {}: {}", what, e)))?;
    Ok(format!("{}{}", XML_DECLARATION, body))
}

impl DepositDescription {
    /// Serializes to a standalone ATOM `<app:collection>` document.
    pub fn to_xml(&self) -> Result<String> {
        render(&AtomCollection::new(self, true), "collection")
    }
}

impl ServiceDocument {
    pub fn to_xml(&self) -> Result<String> {
        let service = AtomService {
            xmlns_app: APP_NS,
            xmlns_atom: ATOM_NS,
            xmlns_sword: SWORD_NS,
            xmlns_dcterms: DCTERMS_NS,
            version: &self.version,
            verbose: self.verbose,
            no_op: self.no_op,
            max_upload_size: self.max_upload_size,
            workspace: AtomWorkspace {
                title: &self.workspace.title,
                collections: self
                    .workspace
                    .collections
                    .iter()
                    .map(|c| AtomCollection::new(c, false))
                    .collect(),
            },
        };
        render(&service, "service document")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn quality_formatting() {
        assert_eq!(format_quality(1.0), "1.0");
        assert_eq!(format_quality(0.0), "0.0");
        assert_eq!(format_quality(0.8), "0.8");
        assert_eq!(format_quality(1.5), "1.5");
    }

    #[test]
    fn minimal_collection_has_no_optional_elements() {
        let d = DepositDescription {
            location: "https://repo.example.org/sword/deposit/col-1".into(),
            title: None,
            policy: None,
            dc_abstract: None,
            mediation: false,
            accepts: vec![],
            accept_packaging: BTreeMap::new(),
            sub_service: None,
        };

        let xml = d.to_xml().unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><app:collection"#));
        assert!(xml.contains(r#"href="https://repo.example.org/sword/deposit/col-1""#));
        assert!(xml.contains("<sword:mediation>false</sword:mediation>"));
        for absent in [
            "atom:title",
            "app:accept",
            "sword:acceptPackaging",
            "sword:collectionPolicy",
            "dcterms:abstract",
            "sword:service",
        ] {
            assert!(!xml.contains(absent), "{} should be omitted: {}", absent, xml);
        }
    }

    #[test]
    fn text_is_escaped() {
        let d = DepositDescription {
            location: "https://repo.example.org/sword/deposit/col-1".into(),
            title: Some("Maps & <Charts>".into()),
            policy: None,
            dc_abstract: None,
            mediation: true,
            accepts: vec![],
            accept_packaging: BTreeMap::new(),
            sub_service: None,
        };
        let xml = d.to_xml().unwrap();
        assert!(xml.contains("Maps &amp; &lt;Charts"));
    }
}
