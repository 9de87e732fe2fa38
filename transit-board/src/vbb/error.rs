//! Data source error types.

/// Errors from the journey data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by journey API")]
    RateLimited,

    /// Rejected credentials or blocked client
    #[error("unauthorized")]
    Unauthorized,

    /// Offline fixture data missing or unreadable
    #[error("fixture error: {0}")]
    Fixture(String),
}
