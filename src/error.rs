use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single lookup attempt
///
/// Every variant is retried by the backoff executor. A lookup that runs out of
/// attempts degrades to its fallback value instead of surfacing this error.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport failure, including the per-attempt timeout. Stored without
    /// the request URL, whose query string carries the API key.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Request failed with status: {0}")]
    Status(StatusCode),

    /// The geocoder returned an empty candidate list
    #[error("No coordinates found for location: {0}")]
    NoCoordinates(String),

    /// The body parsed but lacked a required field
    #[error("Invalid API response format: {0}")]
    MalformedResponse(&'static str),

    /// A numeric field could not be parsed
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}

impl LookupError {
    /// Whether the failure came from the network or the provider's status,
    /// as opposed to the content of a successful response.
    ///
    /// Content failures are retried all the same; a "no match" is unlikely to
    /// change between attempts, so this is reported in the logs.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status(_))
    }
}
