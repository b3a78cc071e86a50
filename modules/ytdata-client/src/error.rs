use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsApiError>;

#[derive(Debug, Error)]
pub enum StatsApiError {
    #[error("Unauthorized: the API rejected the credential, check the configured key")]
    Unauthorized,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for StatsApiError {
    fn from(err: reqwest::Error) -> Self {
        StatsApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for StatsApiError {
    fn from(err: serde_json::Error) -> Self {
        StatsApiError::Parse(err.to_string())
    }
}
