use serde::{Deserialize, Serialize};

use crate::config::BrowserConfig;
use crate::event::Event;
use crate::model::{SightKey, SightRecord};

/// Opens in a new browsing context.
pub const LINK_TARGET: &str = "_blank";
/// No opener handle and no referrer for the new context.
pub const LINK_REL: &str = "noopener noreferrer";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLink {
    pub href: String,
    pub label: String,
    pub target: String,
    pub rel: String,
}

impl MapLink {
    /// Map search for `address`, percent-encoded into the query.
    #[must_use]
    pub fn search(config: &BrowserConfig, address: &str) -> Self {
        Self {
            href: config
                .map_search_base()
                .with_query(&[("api", "1"), ("query", address)]),
            label: config.messages().map_link.clone(),
            target: LINK_TARGET.to_string(),
            rel: LINK_REL.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightCardView {
    pub key: String,
    pub title: String,
    pub zone: String,
    pub category: String,
    pub photo_url: String,
    pub photo_alt: String,
    pub map_link: MapLink,
    /// Index of the record in the current grid; echoed back on detail.
    pub position: usize,
}

impl SightCardView {
    /// The event the card's detail action sends.
    #[must_use]
    pub fn detail_event(&self) -> Event {
        Event::DetailRequested {
            position: self.position,
            key: SightKey(self.key.clone()),
        }
    }
}

/// Summary card for one record. Stateless.
pub struct SightCard;

impl SightCard {
    #[must_use]
    pub fn render(record: &SightRecord, position: usize, config: &BrowserConfig) -> SightCardView {
        SightCardView {
            key: record.key().0,
            title: record.sight_name.clone(),
            zone: record.zone.clone(),
            category: record.category.clone(),
            photo_url: record.photo_url.clone(),
            photo_alt: record.sight_name.clone(),
            map_link: MapLink::search(config, &record.address),
            position,
        }
    }
}
