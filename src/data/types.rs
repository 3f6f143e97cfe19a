use serde::Deserialize;

/// Point-in-time weather snapshot. Replaced wholesale on every successful fetch.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WeatherData {
    /// Air temperature in °C.
    pub temperature: Option<f64>,
    /// Chance of precipitation in percent.
    pub precipitation_probability: Option<f64>,
    /// Observation time as reported by the service (informational only).
    pub observed_at: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub content: Option<String>,
    pub author: Option<String>,
}

impl Quote {
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            author: Some(author.into()),
        }
    }

    /// Substituted when the quotes service answers without a body.
    pub fn fallback() -> Self {
        Self::new("No quote", "No author")
    }

    /// Shown before the first quote arrives.
    pub fn placeholder() -> Self {
        Self::new("Content", "Author")
    }
}

impl Default for Quote {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Where to fetch weather for.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            name: None,
        }
    }

    /// Display label: the configured name, or the coordinates.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{:.2}, {:.2}", self.latitude, self.longitude),
        }
    }
}
