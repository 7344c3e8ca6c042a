//! Projection of controller state into what the shell draws.

mod card;
mod overlay;

pub use self::card::{MapLink, SightCard, SightCardView, LINK_REL, LINK_TARGET};
pub use self::overlay::{ClickTarget, DetailOverlay};

use serde::{Deserialize, Serialize};

use crate::browser::{Presentation, ZoneBrowser};
use crate::config::BrowserConfig;
use crate::error::UserFacingError;
use crate::event::Event;
use crate::model::SightRecord;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTab {
    pub zone: String,
    pub label: String,
    pub selected: bool,
}

impl ZoneTab {
    #[must_use]
    pub fn select_event(&self) -> Event {
        Event::ZoneSelected {
            zone: self.zone.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentView {
    Loading { message: String },
    Error { error: UserFacingError },
    Empty { message: String },
    Grid { cards: Vec<SightCardView> },
}

/// Full record as laid out inside the detail overlay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightDetailView {
    pub name: String,
    pub zone: String,
    pub category: String,
    pub address: String,
    pub photo_url: String,
    /// Verbatim; the shell must preserve whitespace and line breaks.
    pub description: String,
    pub description_lines: Vec<String>,
    pub map_link: MapLink,
    pub close_label: String,
}

impl SightDetailView {
    #[must_use]
    pub fn from_record(record: &SightRecord, config: &BrowserConfig) -> Self {
        Self {
            name: record.sight_name.clone(),
            zone: record.zone.clone(),
            category: record.category.clone(),
            address: record.address.clone(),
            photo_url: record.photo_url.clone(),
            description: record.description.clone(),
            description_lines: record.description.lines().map(str::to_string).collect(),
            map_link: MapLink::search(config, &record.address),
            close_label: config.messages().close.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub zones: Vec<ZoneTab>,
    pub content: ContentView,
    pub overlay: DetailOverlay<SightDetailView>,
}

#[must_use]
pub fn project(browser: &ZoneBrowser) -> ViewModel {
    let config = browser.config();
    let messages = config.messages();

    let zones = config
        .zones()
        .iter()
        .map(|zone| ZoneTab {
            zone: zone.as_str().to_string(),
            label: config.zone_label(zone),
            selected: zone == browser.selected_zone(),
        })
        .collect();

    let content = match browser.presentation() {
        Presentation::Loading => ContentView::Loading {
            message: messages.loading.clone(),
        },
        Presentation::Failed(error) => ContentView::Error {
            error: UserFacingError::new(error, messages.error.clone()),
        },
        Presentation::Empty => ContentView::Empty {
            message: messages.empty.clone(),
        },
        Presentation::Sights(records) => ContentView::Grid {
            cards: records
                .iter()
                .enumerate()
                .map(|(position, record)| SightCard::render(record, position, config))
                .collect(),
        },
    };

    let overlay = DetailOverlay::project(browser.detailed_record().map(|r| &**r), |record| {
        SightDetailView::from_record(record, config)
    });

    ViewModel {
        zones,
        content,
        overlay,
    }
}
