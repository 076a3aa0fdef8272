//! Current conditions from the Tomorrow.io realtime API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::{
    FALLBACK_DESCRIPTION, FALLBACK_NOTE, FALLBACK_TEMPERATURE, REQUEST_TIMEOUT_SECS,
    TOMORROW_API_BASE, TOMORROW_REALTIME_PATH, UNKNOWN_TIME,
};
use crate::error::LookupError;
use crate::formatters::{
    format_humidity, format_location, format_temperature, format_wind_speed,
    weather_code_to_description,
};
use crate::models::{Coordinate, FallbackReason, RealtimeResponse, Resolved, WeatherReport};
use crate::retry::{retry_with_backoff, RetryPolicy};

pub const WEATHER_RETRY_POLICY: RetryPolicy = RetryPolicy::new(3, Duration::from_secs(3));

#[derive(Debug, Clone)]
pub struct WeatherLookup {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
    retry: RetryPolicy,
    timeout: Duration,
}

impl WeatherLookup {
    pub fn new(client: Arc<Client>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: TOMORROW_API_BASE.to_string(),
            retry: WEATHER_RETRY_POLICY,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn from_config(client: Arc<Client>, config: &Config) -> Self {
        Self::new(client, config.weather_api_key.clone())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn resolve(&self, latitude: f64, longitude: f64) -> Resolved<WeatherReport> {
        let coordinate = Coordinate::new(latitude, longitude);

        let Some(api_key) = self.api_key.as_deref() else {
            info!("No WEATHER_API_KEY provided, using dummy weather data");
            return Resolved::Degraded {
                value: fallback_report(coordinate, None),
                reason: FallbackReason::MissingCredential,
            };
        };

        info!(
            "Fetching weather data for coordinates ({:.2}, {:.2})",
            latitude, longitude
        );

        match retry_with_backoff(&self.retry, || self.fetch(coordinate, api_key)).await {
            Ok(report) => Resolved::Live(report),
            Err(e) => {
                warn!(
                    error = %e,
                    transient = e.is_transient(),
                    "Weather data temporarily unavailable. Using sample data as fallback."
                );
                Resolved::Degraded {
                    value: fallback_report(coordinate, Some(FALLBACK_NOTE)),
                    reason: FallbackReason::Exhausted(e.to_string()),
                }
            }
        }
    }

    /// Tool-facing lookup: always returns a report
    pub async fn current(&self, latitude: f64, longitude: f64) -> WeatherReport {
        self.resolve(latitude, longitude).await.into_inner()
    }

    async fn fetch(&self, coordinate: Coordinate, api_key: &str) -> Result<WeatherReport, LookupError> {
        let url = format!("{}{}", self.base_url, TOMORROW_REALTIME_PATH);
        let location = format!("{},{}", coordinate.latitude, coordinate.longitude);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apikey", api_key),
                ("location", location.as_str()),
                ("units", "metric"),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }

        let body: RealtimeResponse = response.json().await?;
        build_report(coordinate, body)
    }
}

fn build_report(coordinate: Coordinate, body: RealtimeResponse) -> Result<WeatherReport, LookupError> {
    let data = body
        .data
        .ok_or(LookupError::MalformedResponse("missing data"))?;
    let values = data
        .values
        .ok_or(LookupError::MalformedResponse("missing data.values"))?;
    let temperature = values
        .temperature_apparent
        .ok_or(LookupError::MalformedResponse("missing temperatureApparent"))?;

    Ok(WeatherReport {
        temperature: format_temperature(temperature),
        description: weather_code_to_description(values.weather_code).to_string(),
        humidity: Some(format_humidity(values.humidity)),
        wind_speed: Some(format_wind_speed(values.wind_speed)),
        location: format_location(coordinate),
        timestamp: Some(data.time.unwrap_or_else(|| UNKNOWN_TIME.to_string())),
        note: None,
    })
}

fn fallback_report(coordinate: Coordinate, note: Option<&str>) -> WeatherReport {
    WeatherReport {
        temperature: FALLBACK_TEMPERATURE.to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
        humidity: None,
        wind_speed: None,
        location: format_location(coordinate),
        timestamp: None,
        note: note.map(str::to_string),
    }
}
