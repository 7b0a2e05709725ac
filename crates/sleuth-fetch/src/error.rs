use sleuth_core::SleuthError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Transport-level fetch failures.
///
/// HTTP error statuses are not failures at this layer; they come back as a
/// normal response.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("invalid proxy {proxy}: {reason}")]
    InvalidProxy { proxy: String, reason: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            FetchError::Timeout(message)
        } else if err.is_connect() {
            FetchError::Connect(message)
        } else if err.is_body() || err.is_decode() {
            FetchError::Body(message)
        } else if err.is_builder() {
            FetchError::InvalidUrl(message)
        } else {
            FetchError::Transport(message)
        }
    }
}

/// Cache persistence failures.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<FetchError> for SleuthError {
    fn from(err: FetchError) -> Self {
        SleuthError::Fetch(err.to_string())
    }
}

impl From<CacheError> for SleuthError {
    fn from(err: CacheError) -> Self {
        SleuthError::Cache(err.to_string())
    }
}
