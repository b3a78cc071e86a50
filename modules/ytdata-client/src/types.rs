use serde::de::{self, Deserializer};
use serde::Deserialize;

/// One video's statistics, flattened from the wire shape for consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRecord {
    pub id: String,
    pub like_count: u64,
    pub dislike_count: u64,
    /// Absent when the video has comments disabled.
    pub comment_count: Option<u64>,
}

impl From<VideoItem> for StatRecord {
    fn from(item: VideoItem) -> Self {
        Self {
            id: item.id,
            like_count: item.statistics.like_count,
            dislike_count: item.statistics.dislike_count,
            comment_count: item.statistics.comment_count,
        }
    }
}

// --- Wire types ---

/// Top-level response of the batched videos listing.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub statistics: VideoStatistics,
}

/// The `statistics` sub-object. The endpoint serializes counts as JSON
/// strings; accept numbers too.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(deserialize_with = "count")]
    pub like_count: u64,
    #[serde(deserialize_with = "count")]
    pub dislike_count: u64,
    #[serde(default, deserialize_with = "opt_count")]
    pub comment_count: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountWire {
    Num(u64),
    Text(String),
}

impl CountWire {
    fn into_u64<E: de::Error>(self) -> std::result::Result<u64, E> {
        match self {
            CountWire::Num(n) => Ok(n),
            CountWire::Text(s) => s
                .parse()
                .map_err(|_| E::custom(format!("invalid count value: {s:?}"))),
        }
    }
}

fn count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    CountWire::deserialize(deserializer)?.into_u64()
}

fn opt_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<CountWire>::deserialize(deserializer)? {
        Some(wire) => wire.into_u64().map(Some),
        None => Ok(None),
    }
}
