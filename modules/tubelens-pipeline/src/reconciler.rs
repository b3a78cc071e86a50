//! Matches fetched statistics back to pending entries.
//!
//! Entries with no matching record stay Pending untouched: already tracked,
//! so never re-scanned, and resolved only if a later batch happens to carry
//! their id.

use std::collections::HashMap;

use tracing::debug;
use ytdata_client::StatRecord;

use crate::renderer;
use crate::state::EntryLedger;
use crate::traits::ListingDom;

/// Per-entry stats as rendered: comment count absent when comments are
/// disabled.
#[derive(Debug, Clone, Copy)]
pub struct StatsView {
    pub likes: u64,
    pub dislikes: u64,
    pub comments: Option<u64>,
}

impl From<&StatRecord> for StatsView {
    fn from(record: &StatRecord) -> Self {
        Self {
            likes: record.like_count,
            dislikes: record.dislike_count,
            comments: record.comment_count,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ReconcileOutcome {
    pub enriched: u32,
    pub still_pending: u32,
}

/// Resolve every Pending entry that has a record in the response; render and
/// mark it Enriched. Misses are left Pending.
pub(crate) fn reconcile(
    dom: &dyn ListingDom,
    ledger: &mut EntryLedger,
    records: &[StatRecord],
) -> ReconcileOutcome {
    let by_id: HashMap<&str, &StatRecord> =
        records.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut outcome = ReconcileOutcome::default();
    for (entry, video_id) in ledger.pending() {
        match by_id.get(video_id.as_str()) {
            Some(record) => {
                renderer::render(dom, ledger, entry, &StatsView::from(*record));
                outcome.enriched += 1;
            }
            None => {
                debug!(video_id = video_id.as_str(), "No record for entry, left pending");
                outcome.still_pending += 1;
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::state::EntryStatus;
    use crate::traits::EntryRef;

    /// Captures appended markup; everything else is inert.
    struct RecordingDom {
        appended: Mutex<Vec<(EntryRef, String)>>,
    }

    impl RecordingDom {
        fn new() -> Self {
            Self {
                appended: Mutex::new(Vec::new()),
            }
        }
    }

    impl ListingDom for RecordingDom {
        fn path(&self) -> String {
            "/results".to_string()
        }

        fn containers(&self, _selector: &str) -> Vec<EntryRef> {
            Vec::new()
        }

        fn title_href(&self, _entry: EntryRef, _selector: &str) -> Option<String> {
            None
        }

        fn append_metadata(&self, entry: EntryRef, markup: &str) {
            self.appended
                .lock()
                .unwrap()
                .push((entry, markup.to_string()));
        }
    }

    fn record(id: &str, likes: u64, dislikes: u64) -> StatRecord {
        StatRecord {
            id: id.to_string(),
            like_count: likes,
            dislike_count: dislikes,
            comment_count: None,
        }
    }

    #[test]
    fn matched_entries_enrich_and_misses_stay_pending() {
        let dom = RecordingDom::new();
        let mut ledger = EntryLedger::default();
        ledger.mark_pending(EntryRef(1), "a1".to_string());
        ledger.mark_pending(EntryRef(2), "b2".to_string());

        let outcome = reconcile(&dom, &mut ledger, &[record("a1", 10, 2)]);

        assert_eq!(outcome.enriched, 1);
        assert_eq!(outcome.still_pending, 1);
        assert_eq!(ledger.status(EntryRef(1)), Some(EntryStatus::Enriched));
        assert_eq!(ledger.status(EntryRef(2)), Some(EntryStatus::Pending));

        let appended = dom.appended.lock().unwrap();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].0, EntryRef(1));
        assert!(appended[0].1.contains("Likes: 10"));
    }

    #[test]
    fn empty_response_leaves_all_entries_pending() {
        let dom = RecordingDom::new();
        let mut ledger = EntryLedger::default();
        ledger.mark_pending(EntryRef(1), "a1".to_string());

        let outcome = reconcile(&dom, &mut ledger, &[]);

        assert_eq!(outcome.enriched, 0);
        assert_eq!(outcome.still_pending, 1);
        assert!(dom.appended.lock().unwrap().is_empty());
    }
}
