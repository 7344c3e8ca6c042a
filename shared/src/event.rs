use crate::capabilities::FetchOutcome;
use crate::model::{FetchTicket, SightKey};
use crate::view::ClickTarget;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Event {
    #[default]
    Noop,

    /// The shell mounted the browser; loads the default zone.
    Started,

    ZoneSelected {
        zone: String,
    },
    RetryRequested,
    SightsFetched {
        ticket: FetchTicket,
        outcome: Box<FetchOutcome>,
    },

    /// A card's detail action. The key guards against clicks from a grid
    /// that has since been replaced.
    DetailRequested {
        position: usize,
        key: SightKey,
    },
    DetailClosed,
    OverlayClicked {
        target: ClickTarget,
    },
    EscapePressed,
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Started => "started",
            Self::ZoneSelected { .. } => "zone_selected",
            Self::RetryRequested => "retry_requested",
            Self::SightsFetched { .. } => "sights_fetched",
            Self::DetailRequested { .. } => "detail_requested",
            Self::DetailClosed => "detail_closed",
            Self::OverlayClicked { .. } => "overlay_clicked",
            Self::EscapePressed => "escape_pressed",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::ZoneSelected { .. }
                | Self::RetryRequested
                | Self::DetailRequested { .. }
                | Self::DetailClosed
                | Self::OverlayClicked { .. }
                | Self::EscapePressed
        )
    }
}
