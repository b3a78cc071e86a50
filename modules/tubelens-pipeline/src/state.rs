//! Pipeline state: the single owned context threaded through each cycle.
//!
//! `PipelineState` lives behind the pipeline's mutex; components receive
//! `&mut` access for the synchronous parts of a cycle. Entry lifecycle is an
//! identity-keyed ledger rather than class tags on the host DOM.

use std::collections::HashMap;

use crate::routes::Route;
use crate::traits::EntryRef;

/// Lifecycle of a tracked entry. Absence from the ledger is "unseen".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Scanned and awaiting statistics.
    Pending,
    /// Statistics rendered; excluded from all future scans.
    Enriched,
}

/// Trigger state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    Idle,
    Activating,
    Processing,
}

#[derive(Debug, Clone)]
pub struct EntryRecord {
    /// Assigned once at scan time, immutable thereafter.
    pub video_id: String,
    pub status: EntryStatus,
}

/// Identity-keyed map from container handle to id and status.
///
/// Status is the scan-exclusion mechanism: tracked entries are never
/// re-scanned, and only a matching fetch record moves Pending to Enriched.
#[derive(Debug, Default)]
pub struct EntryLedger {
    entries: HashMap<EntryRef, EntryRecord>,
}

impl EntryLedger {
    pub fn is_tracked(&self, entry: EntryRef) -> bool {
        self.entries.contains_key(&entry)
    }

    pub fn status(&self, entry: EntryRef) -> Option<EntryStatus> {
        self.entries.get(&entry).map(|r| r.status)
    }

    pub fn mark_pending(&mut self, entry: EntryRef, video_id: String) {
        self.entries.insert(
            entry,
            EntryRecord {
                video_id,
                status: EntryStatus::Pending,
            },
        );
    }

    /// Transition Pending → Enriched. No-op for untracked entries.
    pub fn mark_enriched(&mut self, entry: EntryRef) {
        if let Some(record) = self.entries.get_mut(&entry) {
            record.status = EntryStatus::Enriched;
        }
    }

    /// Entries still awaiting statistics, with their video ids.
    pub fn pending(&self) -> Vec<(EntryRef, String)> {
        self.entries
            .iter()
            .filter(|(_, r)| r.status == EntryStatus::Pending)
            .map(|(e, r)| (*e, r.video_id.clone()))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|r| r.status == EntryStatus::Pending)
            .count()
    }

    /// Forget all tracked entries (navigation reactivation).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Process-wide pipeline state, single instance.
#[derive(Debug)]
pub struct PipelineState {
    /// Resolved once per activation; `None` until a path matches.
    pub route: Option<Route>,
    pub phase: TriggerPhase,
    /// Updated on every scroll observation, triggered or not.
    pub last_scroll_top: f64,
    /// A navigation signal arrived mid-cycle; coalesced, drained on release.
    pub nav_queued: bool,
    pub ledger: EntryLedger,
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            route: None,
            phase: TriggerPhase::Idle,
            last_scroll_top: 0.0,
            nav_queued: false,
            ledger: EntryLedger::default(),
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
