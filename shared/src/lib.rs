// lib.rs - Sight browser shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod view;

pub use app::App;
pub use browser::{Presentation, Resolution, ZoneBrowser};
pub use capabilities::{Capabilities, Effect, FetchOutcome};
pub use config::{BrowserConfig, ConfigError, Messages};
pub use crux_core::{render::Render, App as CruxApp};
pub use error::{BrowserError, ErrorKind, FetchError, UserFacingError};
pub use event::Event;
pub use model::{FetchTicket, SightId, SightKey, SightRecord, Zone};
pub use view::{
    ClickTarget, ContentView, DetailOverlay, MapLink, SightCardView, SightDetailView, ViewModel,
    ZoneTab,
};

/// The controller is the whole of the app's state.
pub type Model = ZoneBrowser;

pub mod app {
    use super::*;
    use crate::capabilities::outcome_from_response;
    use tracing::debug;

    #[derive(Default)]
    pub struct App;

    impl App {
        fn send_sights_request(ticket: FetchTicket, model: &Model, caps: &Capabilities) {
            let url = model.request_url(&ticket);
            debug!(url = %url, generation = ticket.generation, "requesting sights");

            caps.http.get(&url).send(move |result| Event::SightsFetched {
                ticket,
                outcome: Box::new(outcome_from_response(result)),
            });
        }

        fn restart_retrieval(model: &mut Model, caps: &Capabilities) {
            let ticket = model.begin_retrieval();
            Self::send_sights_request(ticket, model, caps);
            caps.render.render();
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            debug!(
                event = event.name(),
                user_initiated = event.is_user_initiated(),
                "handling event"
            );

            match event {
                Event::Noop => {}

                Event::Started | Event::RetryRequested => {
                    Self::restart_retrieval(model, caps);
                }

                Event::ZoneSelected { zone } => {
                    // Unknown zones are logged by the browser and otherwise ignored.
                    if let Ok(ticket) = model.select_zone(Zone::new(zone)) {
                        Self::send_sights_request(ticket, model, caps);
                        caps.render.render();
                    }
                }

                Event::SightsFetched { ticket, outcome } => {
                    if model.resolve(&ticket, *outcome) != Resolution::Stale {
                        caps.render.render();
                    }
                }

                Event::DetailRequested { position, key } => {
                    if model.open_detail_at(position, &key) {
                        caps.render.render();
                    }
                }

                Event::DetailClosed => {
                    if model.close_detail() {
                        caps.render.render();
                    }
                }

                Event::OverlayClicked { target } => {
                    let overlay = DetailOverlay::project(model.detailed_record(), |_| ());
                    if overlay.dismisses_on(target) && model.close_detail() {
                        caps.render.render();
                    }
                }

                Event::EscapePressed => {
                    let overlay = DetailOverlay::project(model.detailed_record(), |_| ());
                    if overlay.dismisses_on_escape() && model.close_detail() {
                        caps.render.render();
                    }
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            view::project(model)
        }
    }
}
