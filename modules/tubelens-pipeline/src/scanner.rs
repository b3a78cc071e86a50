//! Entry scanning and video id extraction.
//!
//! Queries the page for containers under the active route's profile, pries
//! the video id out of each title link, and marks the entry Pending. No
//! network or render side effects.

use tracing::debug;
use url::Url;

use crate::routes::SelectorProfile;
use crate::state::EntryLedger;
use crate::traits::ListingDom;

/// Base used to resolve path-relative link targets.
const PAGE_ORIGIN: &str = "https://www.youtube.com";

#[derive(Debug, Default)]
pub(crate) struct ScanOutcome {
    /// Newly pending video ids, in document order.
    pub new_ids: Vec<String>,
    /// Entries skipped for a missing anchor or an unreadable link target.
    pub skipped: u32,
}

/// Scan the page for entries not yet tracked by the ledger and mark them
/// Pending. Already-tracked entries are excluded by status, so duplicates
/// are impossible by construction.
pub(crate) fn scan(
    dom: &dyn ListingDom,
    profile: &SelectorProfile,
    ledger: &mut EntryLedger,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for entry in dom.containers(profile.container_selector) {
        if ledger.is_tracked(entry) {
            continue;
        }

        let Some(href) = dom.title_href(entry, profile.title_selector) else {
            debug!(entry = entry.0, "Entry has no title anchor, skipping");
            outcome.skipped += 1;
            continue;
        };

        let Some(video_id) = extract_video_id(&href) else {
            debug!(entry = entry.0, href = href.as_str(), "No video id in link target, skipping");
            outcome.skipped += 1;
            continue;
        };

        ledger.mark_pending(entry, video_id.clone());
        outcome.new_ids.push(video_id);
    }

    outcome
}

/// Extract the video id from a title link target: the `v` query parameter,
/// free of any trailing timestamp parameter. Targets may be path-relative.
pub(crate) fn extract_video_id(href: &str) -> Option<String> {
    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(PAGE_ORIGIN).ok()?.join(href).ok()?
        }
        Err(_) => return None,
    };

    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_relative_watch_link() {
        assert_eq!(
            extract_video_id("/watch?v=abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn strips_trailing_timestamp_parameter() {
        assert_eq!(
            extract_video_id("/watch?v=abc123&t=42s"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=xyz&t=1h2m"),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn id_survives_other_parameters() {
        assert_eq!(
            extract_video_id("/watch?list=PL123&v=abc123&index=4"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn links_without_a_video_parameter_yield_nothing() {
        assert_eq!(extract_video_id("/playlist?list=PL123"), None);
        assert_eq!(extract_video_id("/watch?v="), None);
        assert_eq!(extract_video_id(""), None);
    }
}
