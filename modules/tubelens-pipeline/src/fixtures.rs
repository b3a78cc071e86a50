//! Fixture implementations for integration testing.
//!
//! **Fetchers:**
//! - `FixtureStatsFetcher` — canned record corpus; answers each batch with
//!   the subset of records whose id was requested
//! - `GatedStatsFetcher` — holds every fetch in flight until released, for
//!   exercising the single-flight guard
//! - `FailingStatsFetcher` — always fails with a chosen condition

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use ytdata_client::{Result as StatsResult, StatRecord, StatsApiError};

use crate::traits::StatsFetcher;

/// Shorthand for building a canned record.
pub fn record(id: &str, likes: u64, dislikes: u64, comments: Option<u64>) -> StatRecord {
    StatRecord {
        id: id.to_string(),
        like_count: likes,
        dislike_count: dislikes,
        comment_count: comments,
    }
}

// --- FixtureStatsFetcher ---

pub struct FixtureStatsFetcher {
    corpus: Vec<StatRecord>,
    calls: AtomicUsize,
    batches: Mutex<Vec<Vec<String>>>,
}

impl FixtureStatsFetcher {
    pub fn new(corpus: Vec<StatRecord>) -> Self {
        Self {
            corpus,
            calls: AtomicUsize::new(0),
            batches: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every id batch requested so far, in request order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatsFetcher for FixtureStatsFetcher {
    async fn batch_statistics(&self, ids: &[String]) -> StatsResult<Vec<StatRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(ids.to_vec());
        Ok(self
            .corpus
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }
}

// --- GatedStatsFetcher ---

/// Like `FixtureStatsFetcher`, but each call parks until the test releases
/// it, keeping the cycle observably in flight.
pub struct GatedStatsFetcher {
    corpus: Vec<StatRecord>,
    calls: AtomicUsize,
    entered: Semaphore,
    release: Semaphore,
}

impl GatedStatsFetcher {
    pub fn new(corpus: Vec<StatRecord>) -> Self {
        Self {
            corpus,
            calls: AtomicUsize::new(0),
            entered: Semaphore::new(0),
            release: Semaphore::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wait until a fetch is parked in flight.
    pub async fn wait_for_call(&self) {
        self.entered.acquire().await.expect("gate closed").forget();
    }

    /// Let one parked fetch complete.
    pub fn release_one(&self) {
        self.release.add_permits(1);
    }
}

#[async_trait]
impl StatsFetcher for GatedStatsFetcher {
    async fn batch_statistics(&self, ids: &[String]) -> StatsResult<Vec<StatRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.add_permits(1);
        self.release.acquire().await.expect("gate closed").forget();
        Ok(self
            .corpus
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }
}

// --- FailingStatsFetcher ---

#[derive(Debug, Clone, Copy)]
pub enum FailureMode {
    Unauthorized,
    Status(u16),
    Network,
}

pub struct FailingStatsFetcher {
    mode: FailureMode,
    calls: AtomicUsize,
}

impl FailingStatsFetcher {
    pub fn new(mode: FailureMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsFetcher for FailingStatsFetcher {
    async fn batch_statistics(&self, _ids: &[String]) -> StatsResult<Vec<StatRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(match self.mode {
            FailureMode::Unauthorized => StatsApiError::Unauthorized,
            FailureMode::Status(status) => StatsApiError::Api {
                status,
                message: "simulated failure".to_string(),
            },
            FailureMode::Network => StatsApiError::Network("connection refused".to_string()),
        })
    }
}
