//! Capabilities the core asks the shell to perform.
//!
//! We use Crux's built-in Render and Http capabilities directly; the shell
//! owns the network stack and simply executes the request it is handed.

mod http;

pub use self::http::{
    decode_sights, outcome_from_response, sights_url, FetchOutcome, UrlError, ValidatedUrl,
    MAX_URL_LENGTH,
};

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::event::Event;
use crate::App;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
