use std::fmt;

use async_trait::async_trait;

use super::types::{Location, Quote, WeatherData};

/// Errors that can occur while talking to a remote service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Service misconfigured (bad base URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service answered with a non-success status.
    Api { status: u16, message: String },
    /// Body did not match the expected shape.
    Parse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "config error: {msg}"),
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Parse(e.to_string())
        } else if e.is_builder() {
            ServiceError::Config(e.to_string())
        } else {
            ServiceError::Network(e.to_string())
        }
    }
}

/// Source of current weather conditions.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Returns the name of the service (for logging).
    fn name(&self) -> &str;

    async fn get_current_weather(&self, location: &Location) -> Result<WeatherData, ServiceError>;
}

/// Source of random quotes.
#[async_trait]
pub trait QuotesService: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` means the service answered successfully but without a body.
    async fn get_random_quote(&self) -> Result<Option<Quote>, ServiceError>;
}

/// Truncate a response body for error messages and logs.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX).collect();
        format!("{cut}...")
    }
}
