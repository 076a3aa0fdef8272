//! Forward geocoding: free-text place description to coordinates.
//! Uses the maps.co search API and falls back to Bangkok when it cannot answer.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::{
    FALLBACK_LATITUDE, FALLBACK_LONGITUDE, GEOCODE_API_BASE, GEOCODE_SEARCH_PATH,
    REQUEST_TIMEOUT_SECS,
};
use crate::error::LookupError;
use crate::models::{Coordinate, FallbackReason, GeocodeCandidate, Resolved};
use crate::retry::{retry_with_backoff, RetryPolicy};

pub const FALLBACK_COORDINATE: Coordinate = Coordinate::new(FALLBACK_LATITUDE, FALLBACK_LONGITUDE);

pub const GEOCODE_RETRY_POLICY: RetryPolicy = RetryPolicy::new(3, Duration::from_secs(2));

#[derive(Debug, Clone)]
pub struct GeocodeLookup {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
    retry: RetryPolicy,
    timeout: Duration,
}

impl GeocodeLookup {
    pub fn new(client: Arc<Client>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: GEOCODE_API_BASE.to_string(),
            retry: GEOCODE_RETRY_POLICY,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn from_config(client: Arc<Client>, config: &Config) -> Self {
        Self::new(client, config.geocode_api_key.clone())
    }

    /// Points the lookup at another host, e.g. a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Per-attempt timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolve `location` to coordinates, keeping track of whether the answer
    /// is real or the Bangkok fallback.
    pub async fn resolve(&self, location: &str) -> Resolved<Coordinate> {
        let Some(api_key) = self.api_key.as_deref() else {
            info!("No GEO_API_KEY provided, using Bangkok coordinates as fallback");
            return Resolved::Degraded {
                value: FALLBACK_COORDINATE,
                reason: FallbackReason::MissingCredential,
            };
        };

        info!("Looking up coordinates for: {}", location);

        match retry_with_backoff(&self.retry, || self.search(location, api_key)).await {
            Ok(coordinate) => Resolved::Live(coordinate),
            Err(e) => {
                warn!(
                    error = %e,
                    transient = e.is_transient(),
                    "Geocoding unavailable for '{}'. Using Bangkok coordinates as fallback.",
                    location
                );
                Resolved::Degraded {
                    value: FALLBACK_COORDINATE,
                    reason: FallbackReason::Exhausted(e.to_string()),
                }
            }
        }
    }

    /// Tool-facing lookup: always returns a coordinate
    pub async fn lat_lng(&self, location: &str) -> Coordinate {
        self.resolve(location).await.into_inner()
    }

    /// One attempt against the search endpoint
    async fn search(&self, location: &str, api_key: &str) -> Result<Coordinate, LookupError> {
        let url = format!("{}{}", self.base_url, GEOCODE_SEARCH_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[("q", location), ("api_key", api_key)])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }

        // Only the first match is read, so later entries stay untyped
        let candidates: Vec<serde_json::Value> = response.json().await?;
        first_candidate(location, candidates)
    }
}

/// The provider orders candidates by relevance; only the first is used.
fn first_candidate(
    location: &str,
    candidates: Vec<serde_json::Value>,
) -> Result<Coordinate, LookupError> {
    let count = candidates.len();
    let first = candidates
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::NoCoordinates(location.to_string()))?;

    let candidate: GeocodeCandidate = serde_json::from_value(first)
        .map_err(|_| LookupError::MalformedResponse("first candidate lacks lat/lon"))?;

    debug!("Geocoded '{}' using the first of {} candidates", location, count);

    Ok(Coordinate::new(
        candidate.lat.parse("lat")?,
        candidate.lon.parse("lon")?,
    ))
}
