// Trait abstractions for pipeline dependencies.
//
// ListingDom — all host-page access behind one boundary. The pipeline never
//   creates or destroys entries, only queries and annotates them.
// StatsFetcher — the statistics endpoint, with the production impl for
//   YtStatsClient alongside.
//
// These enable deterministic testing with a simulated page and fixture
// fetchers: no browser, no network.

use async_trait::async_trait;

use ytdata_client::{Result as StatsResult, StatRecord, YtStatsClient};

/// Stable handle to one entry container, issued by the DOM boundary.
/// Identity-keyed: the same container yields the same ref for the lifetime
/// of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryRef(pub u64);

/// Host-page access scoped to the active route's selectors.
pub trait ListingDom: Send + Sync {
    /// Current location path, e.g. "/results".
    fn path(&self) -> String;

    /// Entry containers matching the selector, in document order.
    fn containers(&self, selector: &str) -> Vec<EntryRef>;

    /// Link target of the entry's title anchor, or `None` when the anchor
    /// is absent.
    fn title_href(&self, entry: EntryRef, selector: &str) -> Option<String>;

    /// Append markup inside the entry's metadata region.
    fn append_metadata(&self, entry: EntryRef, markup: &str);
}

/// Batched statistics retrieval.
#[async_trait]
pub trait StatsFetcher: Send + Sync {
    /// Fetch statistics for the given video ids in one request.
    async fn batch_statistics(&self, ids: &[String]) -> StatsResult<Vec<StatRecord>>;
}

#[async_trait]
impl StatsFetcher for YtStatsClient {
    async fn batch_statistics(&self, ids: &[String]) -> StatsResult<Vec<StatRecord>> {
        YtStatsClient::batch_statistics(self, ids).await
    }
}
