//! Open-Meteo weather service.
//!
//! Uses the forecast endpoint with `current=` variables, which returns the
//! latest model values for the requested coordinates. No API key needed.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::data::service::{ServiceError, WeatherService, truncate_body};
use crate::data::types::{Location, WeatherData};

pub const DEFAULT_OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Variables requested from the `current` block.
const CURRENT_VARIABLES: &str = "temperature_2m,precipitation_probability";

// ============================================================================
// Open-Meteo API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Deserialize, Debug)]
struct CurrentBlock {
    time: Option<String>,
    temperature_2m: Option<f64>,
    precipitation_probability: Option<f64>,
}

/// Body Open-Meteo sends with 4xx responses.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    reason: String,
}

impl From<CurrentBlock> for WeatherData {
    fn from(current: CurrentBlock) -> Self {
        WeatherData {
            temperature: current.temperature_2m,
            precipitation_probability: current.precipitation_probability,
            observed_at: current.time,
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

pub struct OpenMeteoService {
    base_url: String,
    client: reqwest::Client,
}

impl OpenMeteoService {
    pub fn new(base_url: Option<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Build the service around a preconfigured client (timeouts, user agent).
    pub fn with_client(base_url: Option<String>, client: reqwest::Client) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_OPEN_METEO_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self { base_url, client }
    }
}

#[async_trait]
impl WeatherService for OpenMeteoService {
    fn name(&self) -> &str {
        "open-meteo"
    }

    async fn get_current_weather(&self, location: &Location) -> Result<WeatherData, ServiceError> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();

        info!(
            "Open-Meteo request: latitude={}, longitude={}",
            latitude, longitude
        );

        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_VARIABLES),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("Open-Meteo response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.reason)
                .unwrap_or_else(|_| truncate_body(&body));
            warn!("Open-Meteo API error: {} - {}", status.as_u16(), message);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| ServiceError::Parse(format!("{e}: {}", truncate_body(&body))))?;

        let data = parsed.current.map(WeatherData::from).unwrap_or_default();
        debug!("Open-Meteo snapshot: {:?}", data);
        Ok(data)
    }
}
