use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity token as the sight service sends it: a string or a number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SightId {
    Text(String),
    Number(serde_json::Number),
}

impl SightId {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for SightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One catalog entry. Read-only to the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SightRecord {
    #[serde(default)]
    pub id: Option<SightId>,
    #[serde(rename = "sightName")]
    pub sight_name: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
    #[serde(default)]
    pub description: String,
}

impl SightRecord {
    /// Stable render key. Uniqueness is not guaranteed by the service, so a
    /// missing or blank id falls back to the display name.
    #[must_use]
    pub fn key(&self) -> SightKey {
        match &self.id {
            Some(id) if !id.is_blank() => SightKey(id.to_string()),
            _ => SightKey(self.sight_name.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SightKey(pub String);

impl SightKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named geographic grouping. Membership in the configured zone set is
/// checked by the controller, not here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zone(String);

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Zone {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identity of one retrieval cycle. Only the most recently issued ticket may
/// apply its outcome.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchTicket {
    pub zone: Zone,
    pub generation: u64,
}
