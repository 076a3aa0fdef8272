use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

// ============================================================================
// maps.co Geocoding API Models
// ============================================================================

/// One match from the geocoding search. Other fields the provider sends
/// (`display_name`, `boundingbox`, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct GeocodeCandidate {
    pub lat: NumericField,
    pub lon: NumericField,
}

/// A number the provider may send either bare or quoted
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    pub fn parse(&self, field: &'static str) -> Result<f64, LookupError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse().map_err(|_| LookupError::InvalidNumber {
                field,
                value: s.clone(),
            }),
        }
    }
}

// ============================================================================
// Tomorrow.io Realtime API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RealtimeResponse {
    pub data: Option<RealtimeData>,
}

#[derive(Debug, Deserialize)]
pub struct RealtimeData {
    pub time: Option<String>,
    pub values: Option<RealtimeValues>,
}

#[derive(Debug, Deserialize)]
pub struct RealtimeValues {
    #[serde(rename = "temperatureApparent")]
    pub temperature_apparent: Option<f64>,
    #[serde(rename = "weatherCode")]
    pub weather_code: Option<i64>,
    pub humidity: Option<f64>,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<f64>,
}

// ============================================================================
// Lookup Results
// ============================================================================

/// A point on the globe, serialized as `{"lat": .., "lng": ..}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Neither lookup enforces this; callers may check before use
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Current conditions, already formatted for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub humidity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub wind_speed: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<String>,
    /// Only set on degraded results
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
}

/// Why a lookup returned its fallback value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredential,
    /// Every attempt failed; holds the last error message
    Exhausted(String),
}

/// Outcome of a lookup that never fails: either a live answer or a fallback
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Live(T),
    Degraded { value: T, reason: FallbackReason },
}

impl<T> Resolved<T> {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Live(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Live(value) | Self::Degraded { value, .. } => value,
        }
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetLatLngRequest {
    /// A description of a location, e.g. "Bangkok", "Paris, France", "Eiffel Tower"
    pub location_description: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherRequest {
    /// Latitude coordinate
    pub lat: f64,
    /// Longitude coordinate
    pub lng: f64,
}
