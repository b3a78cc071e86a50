//! Route resolution and per-route selector profiles.
//!
//! Three page layouts are supported. Every other path leaves the pipeline
//! idle; no scan runs until a later activation resolves.

/// The page layout variant, resolved once per activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Results,
    Video,
}

/// Static per-route selectors. Never mutated.
#[derive(Debug, Clone, Copy)]
pub struct SelectorProfile {
    /// Locates entry containers in the listing.
    pub container_selector: &'static str,
    /// Locates the anchor carrying the video link within an entry.
    pub title_selector: &'static str,
}

const HOME: SelectorProfile = SelectorProfile {
    container_selector: "#contents ytd-rich-item-renderer",
    title_selector: "a#video-title-link",
};

const RESULTS: SelectorProfile = SelectorProfile {
    container_selector: "#contents ytd-video-renderer",
    title_selector: "a#video-title",
};

const VIDEO: SelectorProfile = SelectorProfile {
    container_selector: "#related ytd-compact-video-renderer",
    title_selector: "a#video-title",
};

impl Route {
    /// Map a page path to a route. Pure function of the location.
    pub fn resolve(path: &str) -> Option<Route> {
        match path {
            "/" => Some(Route::Home),
            "/results" => Some(Route::Results),
            "/watch" => Some(Route::Video),
            _ => None,
        }
    }

    pub fn profile(self) -> &'static SelectorProfile {
        match self {
            Route::Home => &HOME,
            Route::Results => &RESULTS,
            Route::Video => &VIDEO,
        }
    }
}
