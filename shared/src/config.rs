//! Controller configuration.
//!
//! `BrowserConfig` is immutable once built. Shells either use the default
//! (the Keelung catalog) or ship a JSON document and call
//! [`BrowserConfig::from_json`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::capabilities::{UrlError, ValidatedUrl};
use crate::model::Zone;

pub const DEFAULT_ENDPOINT: &str = "https://keelung-production-7cdf.up.railway.app/SightAPI/db";
pub const DEFAULT_ZONE_PARAM: &str = "zone";
pub const DEFAULT_ZONES: &[&str] = &["中山", "信義", "仁愛", "中正", "安樂", "七堵", "暖暖"];
pub const DEFAULT_ZONE_LABEL_SUFFIX: &str = "區";
pub const DEFAULT_MAP_SEARCH_BASE: &str = "https://www.google.com/maps/search/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("zone list cannot be empty")]
    NoZones,

    #[error("zone at index {0} has a blank name")]
    BlankZone(usize),

    #[error("zone '{0}' appears more than once")]
    DuplicateZone(String),

    #[error("zone query parameter cannot be empty")]
    EmptyZoneParam,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub loading: String,
    pub error: String,
    pub empty: String,
    pub map_link: String,
    pub close: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            loading: "Loading...".into(),
            error: "Failed to load sights.".into(),
            empty: "No sights found for this zone.".into(),
            map_link: "Address".into(),
            close: "Close".into(),
        }
    }
}

/// Serialized shape of the config; every field may be omitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub endpoint: String,
    pub zone_param: String,
    pub zones: Vec<String>,
    pub zone_label_suffix: String,
    pub map_search_base: String,
    pub messages: Messages,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            zone_param: DEFAULT_ZONE_PARAM.into(),
            zones: DEFAULT_ZONES.iter().map(|z| (*z).to_string()).collect(),
            zone_label_suffix: DEFAULT_ZONE_LABEL_SUFFIX.into(),
            map_search_base: DEFAULT_MAP_SEARCH_BASE.into(),
            messages: Messages::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFile", into = "ConfigFile")]
pub struct BrowserConfig {
    endpoint: ValidatedUrl,
    zone_param: String,
    zones: Vec<Zone>,
    zone_label_suffix: String,
    map_search_base: ValidatedUrl,
    messages: Messages,
}

impl BrowserConfig {
    /// Config with the given endpoint and zones; everything else defaulted.
    pub fn new(
        endpoint: &str,
        zones: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ConfigError> {
        Self::try_from(ConfigFile {
            endpoint: endpoint.to_string(),
            zones: zones.into_iter().map(Into::into).collect(),
            ..ConfigFile::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    #[must_use]
    pub fn with_zone_label_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.zone_label_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &ValidatedUrl {
        &self.endpoint
    }

    #[must_use]
    pub fn zone_param(&self) -> &str {
        &self.zone_param
    }

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// First configured zone; the selection at startup.
    #[must_use]
    pub fn default_zone(&self) -> &Zone {
        // Non-empty by construction.
        &self.zones[0]
    }

    #[must_use]
    pub fn contains_zone(&self, zone: &Zone) -> bool {
        self.zones.contains(zone)
    }

    #[must_use]
    pub fn zone_label(&self, zone: &Zone) -> String {
        format!("{zone}{}", self.zone_label_suffix)
    }

    #[must_use]
    pub fn map_search_base(&self) -> &ValidatedUrl {
        &self.map_search_base
    }

    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        match Self::try_from(ConfigFile::default()) {
            Ok(config) => config,
            Err(e) => unreachable!("built-in config is invalid: {e}"),
        }
    }
}

impl TryFrom<ConfigFile> for BrowserConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        if file.zone_param.trim().is_empty() {
            return Err(ConfigError::EmptyZoneParam);
        }
        if file.zones.is_empty() {
            return Err(ConfigError::NoZones);
        }

        let mut seen = HashSet::new();
        let mut zones = Vec::with_capacity(file.zones.len());
        for (index, name) in file.zones.into_iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::BlankZone(index));
            }
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateZone(name));
            }
            zones.push(Zone::new(name));
        }

        Ok(Self {
            endpoint: ValidatedUrl::new(file.endpoint)?,
            zone_param: file.zone_param,
            zones,
            zone_label_suffix: file.zone_label_suffix,
            map_search_base: ValidatedUrl::new(file.map_search_base)?,
            messages: file.messages,
        })
    }
}

impl From<BrowserConfig> for ConfigFile {
    fn from(config: BrowserConfig) -> Self {
        Self {
            endpoint: config.endpoint.into(),
            zone_param: config.zone_param,
            zones: config.zones.into_iter().map(|z| z.as_str().to_string()).collect(),
            zone_label_suffix: config.zone_label_suffix,
            map_search_base: config.map_search_base.into(),
            messages: config.messages,
        }
    }
}
