pub mod error;
pub mod types;

pub use error::{Result, StatsApiError};
pub use types::{StatRecord, VideoListResponse};

use std::time::Duration;

use tracing::debug;

/// Production base URL of the videos listing API.
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";

const PART_STATISTICS: &str = "statistics";

pub struct YtStatsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YtStatsClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Fetch statistics for a batch of video ids in a single GET.
    ///
    /// The identifiers are joined by comma, the endpoint's batch wire
    /// contract. All-or-nothing: either the full record collection parses or
    /// the call fails.
    pub async fn batch_statistics(&self, ids: &[String]) -> Result<Vec<StatRecord>> {
        let url = self.videos_url(ids);
        debug!(batch = ids.len(), "Requesting video statistics");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(StatsApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StatsApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        parse_video_list(&body)
    }

    /// Build the batched request URL. The query string is formatted
    /// literally so the comma-joined id list stays unencoded.
    fn videos_url(&self, ids: &[String]) -> String {
        format!(
            "{}/videos?key={}&part={}&id={}",
            self.base_url,
            self.api_key,
            PART_STATISTICS,
            ids.join(",")
        )
    }
}

/// Parse the response body into flattened records.
pub fn parse_video_list(body: &str) -> Result<Vec<StatRecord>> {
    let listing: VideoListResponse = serde_json::from_str(body)?;
    Ok(listing.items.into_iter().map(StatRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn videos_url_joins_ids_with_commas() {
        let client = YtStatsClient::new("https://api.example.test/v3/", "KEY");
        let ids = vec!["a1".to_string(), "b2".to_string(), "c3".to_string()];
        assert_eq!(
            client.videos_url(&ids),
            "https://api.example.test/v3/videos?key=KEY&part=statistics&id=a1,b2,c3"
        );
    }

    #[test]
    fn parse_video_list_surfaces_malformed_bodies() {
        assert!(matches!(
            parse_video_list("not json"),
            Err(StatsApiError::Parse(_))
        ));
    }
}
