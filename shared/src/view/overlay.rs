use serde::{Deserialize, Serialize};

/// Where a click inside an open overlay landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    /// The full-screen backdrop around the panel.
    Backdrop,
    /// Anything inside the content panel.
    Panel,
}

/// Generic modal container. Knows nothing about what it shows: the caller
/// supplies the content and decides what closing means.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailOverlay<C> {
    pub is_open: bool,
    pub content: Option<C>,
}

impl<C> DetailOverlay<C> {
    #[must_use]
    pub fn closed() -> Self {
        Self {
            is_open: false,
            content: None,
        }
    }

    #[must_use]
    pub fn open(content: C) -> Self {
        Self {
            is_open: true,
            content: Some(content),
        }
    }

    /// Open with `build(source)` when there is a source, closed otherwise.
    /// Content is only built for an open overlay.
    pub fn project<T: ?Sized>(source: Option<&T>, build: impl FnOnce(&T) -> C) -> Self {
        source.map_or_else(Self::closed, |s| Self::open(build(s)))
    }

    /// Clicks on the panel never reach the backdrop, so only a backdrop click
    /// on an open overlay dismisses it.
    #[must_use]
    pub fn dismisses_on(&self, target: ClickTarget) -> bool {
        self.is_open && target == ClickTarget::Backdrop
    }

    #[must_use]
    pub fn dismisses_on_escape(&self) -> bool {
        self.is_open
    }
}

impl<C> Default for DetailOverlay<C> {
    fn default() -> Self {
        Self::closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_overlay_renders_nothing() {
        let overlay = DetailOverlay::<String>::project(None::<&str>, |s| s.to_uppercase());
        assert!(!overlay.is_open);
        assert!(overlay.content.is_none());
    }

    #[test]
    fn test_open_overlay_carries_content() {
        let overlay = DetailOverlay::project(Some("pier"), str::to_uppercase);
        assert!(overlay.is_open);
        assert_eq!(overlay.content.as_deref(), Some("PIER"));
    }

    #[test]
    fn test_content_not_built_when_closed() {
        let mut built = false;
        let _ = DetailOverlay::<()>::project(None::<&u8>, |_| built = true);
        assert!(!built);
    }

    #[test]
    fn test_backdrop_dismisses_panel_does_not() {
        let overlay = DetailOverlay::open(1);
        assert!(overlay.dismisses_on(ClickTarget::Backdrop));
        assert!(!overlay.dismisses_on(ClickTarget::Panel));
        assert!(overlay.dismisses_on_escape());
    }

    #[test]
    fn test_closed_overlay_ignores_input() {
        let overlay = DetailOverlay::<u8>::closed();
        assert!(!overlay.dismisses_on(ClickTarget::Backdrop));
        assert!(!overlay.dismisses_on_escape());
    }

    #[test]
    fn test_click_target_wire_names() {
        assert_eq!(serde_json::to_string(&ClickTarget::Backdrop).unwrap(), "\"backdrop\"");
        let target: ClickTarget = serde_json::from_str("\"panel\"").unwrap();
        assert_eq!(target, ClickTarget::Panel);
    }
}
