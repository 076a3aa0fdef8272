/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-weather-agent/0.1.0";

/// maps.co geocoding API base URL
pub const GEOCODE_API_BASE: &str = "https://geocode.maps.co";

/// Path of the forward geocoding search endpoint
pub const GEOCODE_SEARCH_PATH: &str = "/search";

/// Tomorrow.io API base URL
pub const TOMORROW_API_BASE: &str = "https://api.tomorrow.io";

/// Path of the realtime weather endpoint
pub const TOMORROW_REALTIME_PATH: &str = "/v4/weather/realtime";

/// Per-attempt HTTP timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Upper bound on a single backoff delay, before jitter
pub const MAX_BACKOFF_SECS: f64 = 15.0;

/// Jitter is drawn uniformly from this fraction of the computed delay
pub const JITTER_MIN: f64 = 0.2;
pub const JITTER_MAX: f64 = 0.5;

/// Bangkok, used whenever geocoding cannot produce a real answer
pub const FALLBACK_LATITUDE: f64 = 13.7563;
pub const FALLBACK_LONGITUDE: f64 = 100.5018;

pub const FALLBACK_TEMPERATURE: &str = "28C";
pub const FALLBACK_DESCRIPTION: &str = "Partly Cloudy";
pub const FALLBACK_NOTE: &str = "Weather data temporarily unavailable due to API limits";

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_TIME: &str = "Unknown time";

/// Environment variables holding the provider credentials
pub const GEO_API_KEY_ENV: &str = "GEO_API_KEY";
pub const WEATHER_API_KEY_ENV: &str = "WEATHER_API_KEY";
