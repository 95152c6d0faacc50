use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{Result, SwordError};
use crate::location::UrlManager;
use crate::models::{NegotiationConfig, TargetId};

pub const METS_DSPACE_SIP: &str = "http://purl.org/net/sword/package/METSDSpaceSIP";

/// What a deployment advertises to depositing clients.
pub trait ConfigurationProvider {
    fn is_mediation_enabled(&self) -> bool;
    fn accepted_types(&self) -> Vec<String>;
    fn accept_packaging(&self, target: &TargetId) -> BTreeMap<String, f32>;
    fn is_item_exposure_enabled(&self) -> bool;

    fn item_accepted_types(&self) -> Vec<String>;
    fn item_accept_packaging(&self) -> BTreeMap<String, f32>;

    fn collection_snapshot(&self, target: &TargetId) -> NegotiationConfig {
        NegotiationConfig {
            mediation: self.is_mediation_enabled(),
            accepts: self.accepted_types(),
            accept_packaging: self.accept_packaging(target),
            expose_items: self.is_item_exposure_enabled(),
        }
    }

    /// Items are leaves: they never advertise a sub-service of their own.
    fn item_snapshot(&self) -> NegotiationConfig {
        NegotiationConfig {
            mediation: self.is_mediation_enabled(),
            accepts: self.item_accepted_types(),
            accept_packaging: self.item_accept_packaging(),
            expose_items: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingFormat {
    pub identifier: String,
    pub q: f32,
}

// ---------------------------------------------------------------------------
// The Deployment: loaded once at startup from sword.toml
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwordConfiguration {
    pub deposit_url: String,
    pub servicedocument_url: String,

    #[serde(default)]
    pub mediated: bool,

    // Offer archived items of a collection as deposit targets
    #[serde(default)]
    pub expose_items: bool,

    #[serde(default = "default_accepts")]
    pub accepts: Vec<String>,

    #[serde(default = "default_accepts")]
    pub item_accepts: Vec<String>,

    #[serde(default = "default_packaging")]
    pub accept_packaging: Vec<PackagingFormat>,

    #[serde(default = "default_packaging")]
    pub item_accept_packaging: Vec<PackagingFormat>,

    // Keyed by collection identifier, layered over accept_packaging
    #[serde(default)]
    pub collection_packaging: HashMap<String, Vec<PackagingFormat>>,

    #[serde(default = "default_workspace_title")]
    pub workspace_title: String,

    // Service-document only, in kB
    #[serde(default)]
    pub max_upload_size: Option<u64>,

    #[serde(default)]
    pub verbose: Option<bool>,

    #[serde(default)]
    pub no_op: Option<bool>,

    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,
}

fn default_accepts() -> Vec<String> {
    vec!["application/zip".to_string()]
}

fn default_packaging() -> Vec<PackagingFormat> {
    vec![PackagingFormat {
        identifier: METS_DSPACE_SIP.to_string(),
        q: 1.0,
    }]
}

fn default_workspace_title() -> String {
    "Deposit targets".to_string()
}

fn default_upstream_timeout_ms() -> u64 {
    5000
}

impl SwordConfiguration {
    /// Weights must be finite: `nan` and `inf` have no faithful JSON form.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| SwordError::Configuration(e.to_string()))?;

        let listed = config
            .accept_packaging
            .iter()
            .chain(&config.item_accept_packaging)
            .chain(config.collection_packaging.values().flatten());
        for format in listed {
            if !format.q.is_finite() {
                return Err(SwordError::Configuration(format!(
                    "q={} for '{}' is not a finite number",
                    format.q, format.identifier
                )));
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SwordError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn url_manager(&self) -> Result<UrlManager> {
        UrlManager::new(&self.deposit_url, &self.servicedocument_url)
    }
}

/// Later entries replace earlier ones with the same identifier.
pub fn packaging_map<'a, I>(formats: I) -> BTreeMap<String, f32>
where
    I: IntoIterator<Item = &'a PackagingFormat>,
{
    formats
        .into_iter()
        .map(|f| (f.identifier.clone(), f.q))
        .collect()
}

impl ConfigurationProvider for SwordConfiguration {
    fn is_mediation_enabled(&self) -> bool {
        self.mediated
    }

    fn accepted_types(&self) -> Vec<String> {
        self.accepts.clone()
    }

    fn accept_packaging(&self, target: &TargetId) -> BTreeMap<String, f32> {
        let overrides = self
            .collection_packaging
            .get(target.as_str())
            .into_iter()
            .flatten();
        packaging_map(self.accept_packaging.iter().chain(overrides))
    }

    fn is_item_exposure_enabled(&self) -> bool {
        self.expose_items
    }

    fn item_accepted_types(&self) -> Vec<String> {
        self.item_accepts.clone()
    }

    fn item_accept_packaging(&self) -> BTreeMap<String, f32> {
        packaging_map(&self.item_accept_packaging)
    }
}
