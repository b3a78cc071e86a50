//! Cycle orchestration: triggers, the single-flight guard, and the
//! scan → fetch → reconcile → render sequence.
//!
//! All state lives in one mutex with short critical sections that never span
//! an await; the statistics fetch is the only suspending operation. The
//! guard check and phase transition happen atomically under the lock, so a
//! trigger arriving while a cycle is in flight can never start a second one.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};
use tubelens_common::Config;
use ytdata_client::{StatsApiError, YtStatsClient, DEFAULT_API_URL};

use crate::reconciler;
use crate::routes::Route;
use crate::scanner;
use crate::state::{PipelineState, TriggerPhase};
use crate::traits::{ListingDom, StatsFetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Scan, fetch, and reconcile ran to completion (zero records counts).
    Completed,
    /// The current path matches no known route; nothing ran.
    RouteMiss,
    /// The endpoint rejected the credential; no retry is scheduled.
    Unauthorized,
    /// Transport failure or unexpected status/body; no retry is scheduled.
    FetchFailed,
}

/// Summary of one scan-fetch-render cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    /// Entries newly marked Pending by this cycle's scan.
    pub scanned: u32,
    /// Entries skipped for a missing anchor or unreadable link target.
    pub skipped_no_anchor: u32,
    /// Entries enriched by this cycle.
    pub enriched: u32,
    /// Entries still Pending after this cycle.
    pub still_pending: u32,
}

impl CycleReport {
    fn route_miss() -> Self {
        Self {
            outcome: CycleOutcome::RouteMiss,
            scanned: 0,
            skipped_no_anchor: 0,
            enriched: 0,
            still_pending: 0,
        }
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} scanned, {} skipped, {} enriched, {} pending",
            self.outcome, self.scanned, self.skipped_no_anchor, self.enriched, self.still_pending
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    Activate,
    Navigation,
    Scroll,
}

impl Trigger {
    /// Whether this trigger forgets tags scoped to the previous route.
    fn reactivates(self) -> bool {
        matches!(self, Trigger::Activate | Trigger::Navigation)
    }
}

enum Claim {
    /// Guard claimed, route resolved; the cycle may run.
    Run,
    /// A cycle is in flight; suppressed (scroll) or queued (navigation).
    Deferred,
    /// No route for the current path; back to idle.
    RouteMiss,
}

/// The scan-enrich-render pipeline for one host page.
pub struct Pipeline {
    dom: Arc<dyn ListingDom>,
    fetcher: Arc<dyn StatsFetcher>,
    state: Mutex<PipelineState>,
}

impl Pipeline {
    pub fn new(dom: Arc<dyn ListingDom>, fetcher: Arc<dyn StatsFetcher>) -> Self {
        Self {
            dom,
            fetcher,
            state: Mutex::new(PipelineState::new()),
        }
    }

    /// Wire the production statistics client from configuration.
    pub fn from_config(dom: Arc<dyn ListingDom>, config: &Config) -> Self {
        let fetcher = Arc::new(YtStatsClient::new(DEFAULT_API_URL, &config.api_key));
        Self::new(dom, fetcher)
    }

    /// Initial load. Returns `None` if a cycle is already in flight.
    pub async fn activate(&self) -> Option<CycleReport> {
        self.begin(Trigger::Activate).await
    }

    /// Host navigation / content-updated signal. Full reactivation: the
    /// route is re-resolved and tags scoped to the old route are forgotten.
    /// Mid-cycle signals are coalesced and run after the current cycle.
    pub async fn on_navigation(&self) -> Option<CycleReport> {
        self.begin(Trigger::Navigation).await
    }

    /// Scroll observation. The position is recorded unconditionally; only a
    /// downward move while idle starts a cycle.
    pub async fn on_scroll(&self, offset: f64) -> Option<CycleReport> {
        {
            let mut st = self.state();
            let downward = offset > st.last_scroll_top;
            st.last_scroll_top = offset;
            if !downward {
                return None;
            }
            if st.phase != TriggerPhase::Idle {
                debug!("Scroll during cycle, suppressed");
                return None;
            }
        }
        self.begin(Trigger::Scroll).await
    }

    fn state(&self) -> MutexGuard<'_, PipelineState> {
        self.state.lock().unwrap()
    }

    async fn begin(&self, trigger: Trigger) -> Option<CycleReport> {
        let report = match self.claim(trigger) {
            Claim::Deferred => return None,
            Claim::RouteMiss => CycleReport::route_miss(),
            Claim::Run => self.run_cycle().await,
        };
        self.release_and_drain().await;
        Some(report)
    }

    /// Atomically claim the guard and resolve the route.
    fn claim(&self, trigger: Trigger) -> Claim {
        let mut st = self.state();
        if st.phase == TriggerPhase::Processing {
            match trigger {
                Trigger::Navigation => {
                    debug!("Navigation during cycle, queued");
                    st.nav_queued = true;
                }
                Trigger::Activate | Trigger::Scroll => {
                    debug!("Trigger suppressed, cycle in flight");
                }
            }
            return Claim::Deferred;
        }

        st.phase = TriggerPhase::Activating;
        if trigger.reactivates() {
            st.ledger.clear();
            st.route = None;
        }

        let path = self.dom.path();
        match Route::resolve(&path) {
            Some(route) => {
                st.route = Some(route);
                st.phase = TriggerPhase::Processing;
                debug!(route = ?route, path = path.as_str(), "Cycle starting");
                Claim::Run
            }
            None => {
                st.phase = TriggerPhase::Idle;
                debug!(path = path.as_str(), "No route for path, staying idle");
                Claim::RouteMiss
            }
        }
    }

    /// Release the single-flight guard and run any navigation signal that
    /// arrived mid-cycle. Runs after every cycle regardless of outcome.
    async fn release_and_drain(&self) {
        loop {
            let queued = {
                let mut st = self.state();
                st.phase = TriggerPhase::Idle;
                std::mem::take(&mut st.nav_queued)
            };
            if !queued {
                return;
            }

            match self.claim(Trigger::Navigation) {
                // Another trigger claimed the guard first; its release
                // drains the re-queued signal.
                Claim::Deferred => return,
                Claim::RouteMiss => continue,
                Claim::Run => {
                    let report = self.run_cycle().await;
                    info!(report = %report, "Queued navigation cycle complete");
                }
            }
        }
    }

    async fn run_cycle(&self) -> CycleReport {
        let (route, new_ids, skipped) = {
            let mut st = self.state();
            let route = st.route.expect("cycle started without a resolved route");
            let outcome = scanner::scan(self.dom.as_ref(), route.profile(), &mut st.ledger);
            (route, outcome.new_ids, outcome.skipped)
        };
        debug!(route = ?route, new = new_ids.len(), skipped, "Scan complete");

        let mut report = CycleReport {
            outcome: CycleOutcome::Completed,
            scanned: new_ids.len() as u32,
            skipped_no_anchor: skipped,
            enriched: 0,
            still_pending: 0,
        };

        // An empty batch issues no request; the cycle completes immediately.
        let records = if new_ids.is_empty() {
            Vec::new()
        } else {
            match self.fetcher.batch_statistics(&new_ids).await {
                Ok(records) => records,
                Err(StatsApiError::Unauthorized) => {
                    warn!("Statistics endpoint rejected the credential, check the configured key");
                    report.outcome = CycleOutcome::Unauthorized;
                    report.still_pending = self.state().ledger.pending_count() as u32;
                    return report;
                }
                Err(err) => {
                    warn!(error = %err, "Statistics fetch failed");
                    report.outcome = CycleOutcome::FetchFailed;
                    report.still_pending = self.state().ledger.pending_count() as u32;
                    return report;
                }
            }
        };

        let mut st = self.state();
        let outcome = reconciler::reconcile(self.dom.as_ref(), &mut st.ledger, &records);
        report.enriched = outcome.enriched;
        report.still_pending = outcome.still_pending;
        report
    }
}
