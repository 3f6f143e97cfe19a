use std::sync::Arc;

use log::{debug, info};

use crate::core::signal::{Observer, Signal};
use crate::data::service::{ServiceError, WeatherService};
use crate::data::types::{Location, WeatherData};

/// Latest weather snapshot for one location, plus a way to refresh it.
pub struct WeatherRepository {
    service: Arc<dyn WeatherService>,
    location: Location,
    weather: Signal<Option<WeatherData>>,
}

impl WeatherRepository {
    pub fn new(service: Arc<dyn WeatherService>, location: Location) -> Self {
        Self {
            service,
            location,
            weather: Signal::new(None),
        }
    }

    /// Observe the latest snapshot. `None` until the first successful fetch.
    pub fn weather_flow(&self) -> Observer<Option<WeatherData>> {
        self.weather.subscribe()
    }

    pub fn latest(&self) -> Option<WeatherData> {
        self.weather.get()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Fetch current weather and publish it.
    ///
    /// On failure the error is returned and the published snapshot is left as is.
    pub async fn fetch_weather_data(&self) -> Result<(), ServiceError> {
        debug!(
            "Fetching weather from {} for {}",
            self.service.name(),
            self.location.label()
        );
        let data = self.service.get_current_weather(&self.location).await?;
        info!(
            "Weather updated: temperature={:?}, precipitation={:?}",
            data.temperature, data.precipitation_probability
        );
        self.weather.publish(Some(data));
        Ok(())
    }
}
