use anyhow::Result;
use reqwest::Client;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::geocode::GeocodeLookup;
use crate::models::{Coordinate, GetLatLngRequest, GetWeatherRequest};
use crate::prompt::WEATHER_AGENT_PROMPT;
use crate::weather::WeatherLookup;

/// MCP server exposing the geocoding and weather tools
#[derive(Clone)]
pub struct WeatherAgent {
    geocode: GeocodeLookup,
    weather: WeatherLookup,
    tool_router: ToolRouter<Self>,
}

impl WeatherAgent {
    /// Creates the server with one shared HTTP client for both providers
    pub fn new(config: &Config) -> Result<Self> {
        let client = Arc::new(Client::builder().user_agent(USER_AGENT).build()?);

        Ok(Self::with_lookups(
            GeocodeLookup::from_config(Arc::clone(&client), config),
            WeatherLookup::from_config(client, config),
        ))
    }

    pub fn with_lookups(geocode: GeocodeLookup, weather: WeatherLookup) -> Self {
        if !geocode.has_credential() {
            tracing::warn!("GEO_API_KEY not set, get_lat_lng will always return Bangkok");
        }
        if !weather.has_credential() {
            tracing::warn!("WEATHER_API_KEY not set, get_weather will always return sample data");
        }

        Self {
            geocode,
            weather,
            tool_router: Self::tool_router(),
        }
    }
}

/// Wraps a lookup result as a single JSON text block
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize tool result: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_handler]
impl ServerHandler for WeatherAgent {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-weather-agent".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(WEATHER_AGENT_PROMPT.to_string()),
        }
    }
}

#[tool_router]
impl WeatherAgent {
    /// Resolves a place description to coordinates
    #[tool(description = "Get the latitude and longitude of a location. Provide a description of the location (e.g., 'Bangkok', 'New York City', 'Eiffel Tower'). Returns an object with 'lat' and 'lng'.")]
    async fn get_lat_lng(
        &self,
        Parameters(request): Parameters<GetLatLngRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("get_lat_lng called for: {}", request.location_description);

        let coordinate = self.geocode.lat_lng(&request.location_description).await;

        json_result(&coordinate)
    }

    /// Gets current weather for a coordinate pair
    #[tool(description = "Get current weather information for specific coordinates. Provide lat and lng (e.g., lat: 13.7563, lng: 100.5018 for Bangkok). Returns temperature, description, humidity, wind speed, location and timestamp.")]
    async fn get_weather(
        &self,
        Parameters(request): Parameters<GetWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("get_weather called for: {}, {}", request.lat, request.lng);

        if !Coordinate::new(request.lat, request.lng).is_valid() {
            tracing::warn!(
                "Coordinates out of range ({}, {}), passing them to the provider unchanged",
                request.lat,
                request.lng
            );
        }

        let report = self.weather.current(request.lat, request.lng).await;

        json_result(&report)
    }
}
