use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// The Identity: a repository object handle (e.g. "123456789/42" or "col-42")
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TargetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Community,
    Collection,
    Item,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Community => "community",
            ObjectKind::Collection => "collection",
            ObjectKind::Item => "item",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "community" => Ok(ObjectKind::Community),
            "collection" => Ok(ObjectKind::Collection),
            "item" => Ok(ObjectKind::Item),
            other => Err(format!("unknown object kind '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// The Container: a collection that accepts deposits
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionTarget {
    pub id: TargetId,

    #[serde(default)]
    pub name: Option<String>,

    // The licence the collection adheres to; advertised as its policy
    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub short_description: Option<String>,
}

// ---------------------------------------------------------------------------
// The Child: an archived item offered as a deposit target in the sub-service
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTarget {
    pub id: TargetId,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A repository object narrowed to its kind at the accessor boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum DepositTarget {
    Community(TargetId),
    Collection(CollectionTarget),
    Item(ItemTarget),
}

impl DepositTarget {
    pub fn id(&self) -> &TargetId {
        match self {
            DepositTarget::Community(id) => id,
            DepositTarget::Collection(col) => &col.id,
            DepositTarget::Item(item) => &item.id,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            DepositTarget::Community(_) => ObjectKind::Community,
            DepositTarget::Collection(_) => ObjectKind::Collection,
            DepositTarget::Item(_) => ObjectKind::Item,
        }
    }
}
