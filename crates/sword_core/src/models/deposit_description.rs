use serde::Serialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// The Offer: what a SWORD client may deposit into one target
// Rendered as an ATOM <app:collection> by crate::atom
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositDescription {
    // The deposit endpoint (href attribute of the collection)
    pub location: String,

    // Absent when the source metadata is null or empty, never Some("")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,

    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub dc_abstract: Option<String>,

    pub mediation: bool,

    pub accepts: Vec<String>,

    pub accept_packaging: BTreeMap<String, f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_service: Option<String>,
}

impl DepositDescription {
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::SwordError::Serialization(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// The Listing: a SWORD 1.3 service document with a single workspace
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDocument {
    pub version: String,
    pub max_upload_size: Option<u64>,
    pub verbose: Option<bool>,
    pub no_op: Option<bool>,
    pub workspace: Workspace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workspace {
    pub title: String,
    pub collections: Vec<DepositDescription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_omits_absent_fields() {
        let description = DepositDescription {
            location: "https://repo.example.org/sword/deposit/col-1".into(),
            title: None,
            policy: None,
            dc_abstract: Some("Theses".into()),
            mediation: false,
            accepts: vec![],
            accept_packaging: BTreeMap::new(),
            sub_service: None,
        };

        let json = description.to_json().unwrap();
        assert!(json.contains("\"abstract\": \"Theses\""));
        assert!(!json.contains("title"));
        assert!(!json.contains("policy"));
        assert!(!json.contains("sub_service"));
    }
}
