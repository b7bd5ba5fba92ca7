use crate::weather_data::parser::PageError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while retrieving or reading one month of station data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {0} timed out")]
    Timeout(String, #[source] reqwest::Error),

    #[error("Failed to read response body from {0}")]
    Body(String, #[source] reqwest::Error),

    #[error("Unexpected page layout for station '{station}' ({year}-{month:02})")]
    Page {
        station: String,
        year: i32,
        month: u32,
        #[source]
        source: PageError,
    },
}

/// Failure while persisting or loading a cached year record.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Station name '{0}' cannot be used as a cache directory")]
    InvalidStation(String),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cache file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to move cache file into place at '{0}'")]
    CachePersist(PathBuf, #[source] std::io::Error),

    #[error("Failed to delete cache '{0}'")]
    CacheDeletion(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode cache data from '{0}'")]
    CacheDecode(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode cache data for '{0}'")]
    CacheEncode(PathBuf, #[source] serde_json::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
