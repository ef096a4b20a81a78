//! Error types for imdb_plex_sync

use thiserror::Error;

/// Unified error type for import operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed after a connection was made (timeout, body, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// Plex server could not be reached at all
    #[error("Plex server unreachable at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse JSON (API response or config file)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Library section not present on the server
    #[error("Library '{name}' not found (available: {})", .available.join(", "))]
    LibraryNotFound { name: String, available: Vec<String> },
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Short alias used across the crate
pub type Error = SyncError;

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            let url = err
                .url()
                .map(|u| u.origin().ascii_serialization())
                .unwrap_or_default();
            SyncError::Unreachable { url, source: err }
        } else {
            SyncError::Network(err)
        }
    }
}

/// Result alias for imdb_plex_sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
