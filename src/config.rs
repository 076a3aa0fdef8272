use crate::constants::{GEO_API_KEY_ENV, WEATHER_API_KEY_ENV};

/// Provider credentials. A missing key puts the matching lookup into
/// fallback-only mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub geocode_api_key: Option<String>,
    pub weather_api_key: Option<String>,
}

impl Config {
    pub fn new(geocode_api_key: Option<String>, weather_api_key: Option<String>) -> Self {
        Self {
            geocode_api_key: non_blank(geocode_api_key),
            weather_api_key: non_blank(weather_api_key),
        }
    }

    /// Loads `.env` if present, then reads `GEO_API_KEY` and `WEATHER_API_KEY`
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }

        Self::new(
            std::env::var(GEO_API_KEY_ENV).ok(),
            std::env::var(WEATHER_API_KEY_ENV).ok(),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
