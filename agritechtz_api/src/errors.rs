//! Error types for the crop price client.

/// Boxed cause carried by [`Error::FetchFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building a query, fetching, or parsing the response.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A setter received input it cannot accept. The builder was not modified.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The request did not produce a successful response (network error,
    /// timeout, or non-success status).
    #[error("Fetch failed: {reason}")]
    FetchFailed {
        reason: String,
        /// HTTP status, when the server answered.
        status: Option<u16>,
        #[source]
        source: Option<BoxError>,
    },
    /// The response body could not be turned into a crop price table.
    #[error("Failed to parse crop prices: {0}")]
    ParseFailed(String),
}

impl Error {
    pub(crate) fn fetch<E>(reason: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::FetchFailed {
            reason: reason.into(),
            status: None,
            source: Some(source.into()),
        }
    }

    /// Returns `true` for [`Error::FetchFailed`].
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::FetchFailed { .. })
    }
}
