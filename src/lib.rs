//! Geocoding and current-weather tools for a conversational agent, served
//! over MCP. Both lookups retry with exponential backoff and degrade to fixed
//! fallback values instead of failing.

pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod geocode;
pub mod models;
pub mod prompt;
pub mod retry;
pub mod service;
pub mod weather;

pub use config::Config;
pub use error::LookupError;
pub use geocode::GeocodeLookup;
pub use models::{Coordinate, FallbackReason, Resolved, WeatherReport};
pub use retry::{retry_with_backoff, RetryPolicy};
pub use service::WeatherAgent;
pub use weather::WeatherLookup;
