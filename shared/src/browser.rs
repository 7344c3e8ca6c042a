//! Zone browser controller.
//!
//! Owns the selected zone, the fetched records, the loading/error flags and
//! the record shown in the detail overlay. Every method is a plain state
//! transition; issuing the actual request is the caller's job, using the
//! [`FetchTicket`] a transition hands back.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::capabilities::{sights_url, FetchOutcome};
use crate::config::BrowserConfig;
use crate::error::{BrowserError, FetchError};
use crate::model::{FetchTicket, SightKey, SightRecord, Zone};

/// What became of a response handed to [`ZoneBrowser::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Applied { count: usize },
    Failed,
    /// Superseded by a newer retrieval cycle; state untouched.
    Stale,
}

/// Which of the mutually exclusive content states is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presentation<'a> {
    Loading,
    Failed(&'a FetchError),
    Empty,
    Sights(&'a [Arc<SightRecord>]),
}

#[derive(Debug, Clone)]
pub struct ZoneBrowser {
    config: BrowserConfig,
    selected_zone: Zone,
    records: Vec<Arc<SightRecord>>,
    is_loading: bool,
    fetch_error: Option<FetchError>,
    detailed_record: Option<Arc<SightRecord>>,
    generation: u64,
    in_flight: Option<FetchTicket>,
}

impl Default for ZoneBrowser {
    fn default() -> Self {
        Self::new(BrowserConfig::default())
    }
}

impl ZoneBrowser {
    #[must_use]
    pub fn new(config: BrowserConfig) -> Self {
        let selected_zone = config.default_zone().clone();
        Self {
            config,
            selected_zone,
            records: Vec::new(),
            is_loading: false,
            fetch_error: None,
            detailed_record: None,
            generation: 0,
            in_flight: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    #[must_use]
    pub fn selected_zone(&self) -> &Zone {
        &self.selected_zone
    }

    #[must_use]
    pub fn records(&self) -> &[Arc<SightRecord>] {
        &self.records
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn fetch_error(&self) -> Option<&FetchError> {
        self.fetch_error.as_ref()
    }

    #[must_use]
    pub fn detailed_record(&self) -> Option<&Arc<SightRecord>> {
        self.detailed_record.as_ref()
    }

    /// Ticket of the outstanding retrieval for the current selection, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<&FetchTicket> {
        self.in_flight.as_ref()
    }

    /// Starts a retrieval cycle for the selected zone. Any earlier cycle that
    /// has not resolved yet becomes stale.
    pub fn begin_retrieval(&mut self) -> FetchTicket {
        self.generation += 1;
        self.is_loading = true;
        self.fetch_error = None;

        let ticket = FetchTicket {
            zone: self.selected_zone.clone(),
            generation: self.generation,
        };
        self.in_flight = Some(ticket.clone());

        debug!(zone = %ticket.zone, generation = ticket.generation, "retrieval cycle started");
        ticket
    }

    /// Selects `zone` and starts a retrieval cycle for it. Reselecting the
    /// active zone refreshes it.
    pub fn select_zone(&mut self, zone: Zone) -> Result<FetchTicket, BrowserError> {
        if !self.config.contains_zone(&zone) {
            warn!(zone = %zone, "ignoring selection outside the zone set");
            return Err(BrowserError::UnknownZone(zone.as_str().to_string()));
        }

        info!(zone = %zone, "zone selected");
        self.selected_zone = zone;
        Ok(self.begin_retrieval())
    }

    #[must_use]
    pub fn request_url(&self, ticket: &FetchTicket) -> String {
        sights_url(self.config.endpoint(), self.config.zone_param(), &ticket.zone)
    }

    /// Applies the outcome of the retrieval identified by `ticket`, unless a
    /// newer cycle has started since it was issued.
    #[instrument(skip_all, fields(zone = %ticket.zone, generation = ticket.generation))]
    pub fn resolve(&mut self, ticket: &FetchTicket, outcome: FetchOutcome) -> Resolution {
        if self.in_flight.as_ref() != Some(ticket) {
            debug!(latest = self.generation, "discarding stale sight response");
            return Resolution::Stale;
        }

        self.in_flight = None;
        self.is_loading = false;

        match outcome {
            Ok(records) => {
                let count = records.len();
                self.records = records.into_iter().map(Arc::new).collect();
                info!(count, "sights loaded");
                Resolution::Applied { count }
            }
            Err(error) => {
                warn!(code = error.code(), error = %error, "sight retrieval failed");
                self.fetch_error = Some(error);
                Resolution::Failed
            }
        }
    }

    /// Shows `record` in the detail overlay, replacing whatever was shown.
    pub fn open_detail(&mut self, record: Arc<SightRecord>) {
        debug!(sight = %record.key(), "detail opened");
        self.detailed_record = Some(record);
    }

    /// Opens the record at `position` in the visible grid, provided it still
    /// carries `key`. Returns false when the grid is hidden, the position is
    /// out of range, or the record there has been replaced.
    pub fn open_detail_at(&mut self, position: usize, key: &SightKey) -> bool {
        let Presentation::Sights(records) = self.presentation() else {
            debug!(position, "detail requested while the grid is hidden");
            return false;
        };
        let len = records.len();

        match records.get(position).cloned() {
            Some(record) if record.key() == *key => {
                self.open_detail(record);
                true
            }
            Some(record) => {
                warn!(position, requested = %key, found = %record.key(), "detail requested for a replaced record");
                false
            }
            None => {
                warn!(position, len, "detail requested for missing record");
                false
            }
        }
    }

    /// Returns whether the overlay was open.
    pub fn close_detail(&mut self) -> bool {
        let was_open = self.detailed_record.take().is_some();
        if was_open {
            debug!("detail closed");
        }
        was_open
    }

    /// Loading beats error, error beats empty, empty beats the grid. Records
    /// retained from an earlier zone are never visible next to an error or a
    /// loading indicator.
    #[must_use]
    pub fn presentation(&self) -> Presentation<'_> {
        if self.is_loading {
            Presentation::Loading
        } else if let Some(error) = &self.fetch_error {
            Presentation::Failed(error)
        } else if self.records.is_empty() {
            Presentation::Empty
        } else {
            Presentation::Sights(&self.records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn browser() -> ZoneBrowser {
        ZoneBrowser::new(BrowserConfig::new("https://api.example.com/sights", ["A", "B"]).unwrap())
    }

    fn key(id: &str) -> SightKey {
        SightKey(id.into())
    }

    fn sight(id: &str, name: &str) -> SightRecord {
        SightRecord {
            id: Some(crate::model::SightId::Text(id.into())),
            sight_name: name.into(),
            zone: "A".into(),
            category: "Harbor".into(),
            address: "1 Dock Rd".into(),
            photo_url: "p.jpg".into(),
            description: "nice".into(),
        }
    }

    #[test]
    fn test_initial_state() {
        let browser = browser();
        assert_eq!(browser.selected_zone(), &Zone::new("A"));
        assert!(!browser.is_loading());
        assert!(browser.in_flight().is_none());
        assert!(browser.detailed_record().is_none());
    }

    #[test]
    fn test_begin_retrieval_sets_loading_and_clears_error() {
        let mut browser = browser();
        let ticket = browser.begin_retrieval();
        browser.resolve(&ticket, Err(FetchError::Status { code: 500 }));
        assert!(browser.fetch_error().is_some());

        let retry = browser.begin_retrieval();
        assert!(browser.is_loading());
        assert!(browser.fetch_error().is_none());
        assert_eq!(retry.zone, Zone::new("A"));
        assert!(retry.generation > ticket.generation);
    }

    #[test]
    fn test_select_unknown_zone_is_rejected() {
        let mut browser = browser();
        assert_matches!(
            browser.select_zone(Zone::new("Z")),
            Err(BrowserError::UnknownZone(z)) if z == "Z"
        );
        assert_eq!(browser.selected_zone(), &Zone::new("A"));
        assert!(!browser.is_loading());
    }

    #[test]
    fn test_successful_resolution_replaces_records() {
        let mut browser = browser();
        let first = browser.select_zone(Zone::new("A")).unwrap();
        browser.resolve(&first, Ok(vec![sight("1", "Pier"), sight("2", "Fort")]));
        assert_eq!(browser.records().len(), 2);

        let second = browser.select_zone(Zone::new("B")).unwrap();
        assert_eq!(
            browser.resolve(&second, Ok(vec![sight("3", "Hill")])),
            Resolution::Applied { count: 1 }
        );
        assert_eq!(browser.records().len(), 1);
        assert_eq!(browser.records()[0].sight_name, "Hill");
        assert!(!browser.is_loading());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut browser = browser();
        let a = browser.select_zone(Zone::new("A")).unwrap();
        let b = browser.select_zone(Zone::new("B")).unwrap();

        assert_eq!(browser.resolve(&a, Ok(vec![sight("1", "Pier")])), Resolution::Stale);
        assert!(browser.is_loading());
        assert!(browser.records().is_empty());

        assert_eq!(browser.resolve(&b, Ok(Vec::new())), Resolution::Applied { count: 0 });
        assert_eq!(
            browser.resolve(&a, Err(FetchError::Transport("late".into()))),
            Resolution::Stale
        );
        assert!(browser.fetch_error().is_none());
        assert_eq!(browser.presentation(), Presentation::Empty);
    }

    #[test]
    fn test_reselecting_same_zone_supersedes_earlier_request() {
        let mut browser = browser();
        let first = browser.select_zone(Zone::new("A")).unwrap();
        let refresh = browser.select_zone(Zone::new("A")).unwrap();
        assert_ne!(first, refresh);

        assert_eq!(browser.resolve(&first, Ok(vec![sight("1", "Old")])), Resolution::Stale);
        assert_eq!(
            browser.resolve(&refresh, Ok(vec![sight("1", "New")])),
            Resolution::Applied { count: 1 }
        );
        assert_eq!(browser.records()[0].sight_name, "New");
    }

    #[test]
    fn test_duplicate_resolution_is_ignored() {
        let mut browser = browser();
        let ticket = browser.begin_retrieval();
        browser.resolve(&ticket, Ok(vec![sight("1", "Pier")]));
        assert_eq!(browser.resolve(&ticket, Ok(Vec::new())), Resolution::Stale);
        assert_eq!(browser.records().len(), 1);
    }

    #[test]
    fn test_failure_hides_previous_records() {
        let mut browser = browser();
        let a = browser.select_zone(Zone::new("A")).unwrap();
        browser.resolve(&a, Ok(vec![sight("1", "Pier")]));

        let b = browser.select_zone(Zone::new("B")).unwrap();
        assert_eq!(
            browser.resolve(&b, Err(FetchError::Decode("bad".into()))),
            Resolution::Failed
        );
        assert!(!browser.is_loading());
        assert_matches!(browser.presentation(), Presentation::Failed(FetchError::Decode(_)));
    }

    #[test]
    fn test_loading_hides_previous_records() {
        let mut browser = browser();
        let a = browser.select_zone(Zone::new("A")).unwrap();
        browser.resolve(&a, Ok(vec![sight("1", "Pier")]));
        assert_matches!(browser.presentation(), Presentation::Sights(records) if records.len() == 1);

        browser.select_zone(Zone::new("B")).unwrap();
        assert_eq!(browser.presentation(), Presentation::Loading);
    }

    #[test]
    fn test_detail_open_close() {
        let mut browser = browser();
        let ticket = browser.begin_retrieval();
        browser.resolve(&ticket, Ok(vec![sight("1", "Pier"), sight("2", "Fort")]));

        assert!(browser.open_detail_at(0, &key("1")));
        assert!(browser.open_detail_at(1, &key("2")));
        assert!(browser.open_detail_at(1, &key("2")));
        assert_eq!(browser.detailed_record().unwrap().sight_name, "Fort");
        assert!(Arc::ptr_eq(browser.detailed_record().unwrap(), &browser.records()[1]));

        assert!(browser.close_detail());
        assert!(browser.detailed_record().is_none());
        assert!(!browser.close_detail());
    }

    #[test]
    fn test_detail_out_of_range_is_ignored() {
        let mut browser = browser();
        assert!(!browser.open_detail_at(0, &key("1")));
        assert!(browser.detailed_record().is_none());

        let ticket = browser.begin_retrieval();
        browser.resolve(&ticket, Ok(vec![sight("1", "Pier")]));
        assert!(!browser.open_detail_at(3, &key("1")));
        assert!(browser.detailed_record().is_none());
    }

    #[test]
    fn test_detail_ignored_while_grid_hidden() {
        let mut browser = browser();
        let a = browser.select_zone(Zone::new("A")).unwrap();
        browser.resolve(&a, Ok(vec![sight("1", "Pier")]));

        let b = browser.select_zone(Zone::new("B")).unwrap();
        assert!(!browser.open_detail_at(0, &key("1")));

        browser.resolve(&b, Err(FetchError::Status { code: 500 }));
        assert!(!browser.open_detail_at(0, &key("1")));
        assert!(browser.detailed_record().is_none());
    }

    #[test]
    fn test_detail_for_replaced_record_is_ignored() {
        let mut browser = browser();
        let a = browser.select_zone(Zone::new("A")).unwrap();
        browser.resolve(&a, Ok(vec![sight("1", "Pier")]));
        let b = browser.select_zone(Zone::new("B")).unwrap();
        browser.resolve(&b, Ok(vec![sight("2", "Hill")]));

        assert!(!browser.open_detail_at(0, &key("1")));
        assert!(browser.detailed_record().is_none());
        assert!(browser.open_detail_at(0, &key("2")));
        assert_eq!(browser.detailed_record().unwrap().sight_name, "Hill");
    }

    #[test]
    fn test_detail_survives_new_retrieval() {
        let mut browser = browser();
        let a = browser.select_zone(Zone::new("A")).unwrap();
        browser.resolve(&a, Ok(vec![sight("1", "Pier")]));
        assert!(browser.open_detail_at(0, &key("1")));

        let b = browser.select_zone(Zone::new("B")).unwrap();
        browser.resolve(&b, Ok(vec![sight("2", "Hill")]));
        assert_eq!(browser.detailed_record().unwrap().sight_name, "Pier");
    }

    #[test]
    fn test_request_url_uses_ticket_zone() {
        let mut browser = browser();
        let ticket = browser.select_zone(Zone::new("B")).unwrap();
        assert_eq!(browser.request_url(&ticket), "https://api.example.com/sights?zone=B");
    }
}
