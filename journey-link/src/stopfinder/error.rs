//! Stop-finder error types.

/// Errors that can occur when looking up stops.
///
/// An address with no matching stops is not an error; it yields an empty
/// result instead.
#[derive(Debug, thiserror::Error)]
pub enum StopFinderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not a stop-finder payload
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Canned mock data could not be loaded or was set up to fail
    #[error("mock stop finder: {message}")]
    Mock { message: String },
}
