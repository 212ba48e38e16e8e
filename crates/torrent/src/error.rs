//! Error type shared by the external service clients

use thiserror::Error;

/// Failure talking to the torrent client, the search aggregator or the
/// streaming server
#[derive(Debug, Error)]
pub enum ApiError {
    /// qBittorrent Web API error
    #[error("qBittorrent error: {0}")]
    Qbit(#[from] qbit_rs::Error),
    /// HTTP transport or non-success status from Jackett / TorrServer
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// A link that could not be parsed as a URL
    #[error("Invalid link: {0}")]
    InvalidLink(String),
    /// A required environment variable is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),
    /// The item carries nothing the service can be given
    #[error("{0}")]
    Unsupported(String),
}

/// Result type alias for service calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Read a required environment variable
pub(crate) fn require_env(name: &str) -> ApiResult<String> {
    std::env::var(name).map_err(|_| ApiError::Config(format!("{} must be set in .env file", name)))
}
