//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::core::view_model::HomeViewModel;
use crate::data::repositories::{
    NetworkRepository, QuotesRepository, ReachabilityProbe, WeatherRepository,
};
use crate::data::service::{QuotesService, ServiceError, WeatherService};
use crate::data::types::{Location, Quote, WeatherData};

pub fn sample_weather() -> WeatherData {
    WeatherData {
        temperature: Some(21.5),
        precipitation_probability: Some(40.0),
        observed_at: Some("2024-06-01T12:00".to_string()),
    }
}

pub fn sample_quote() -> Quote {
    Quote::new("Simplicity is prerequisite for reliability.", "Edsger Dijkstra")
}

pub fn test_location() -> Location {
    Location {
        latitude: 52.52,
        longitude: 13.41,
        name: Some("Berlin".to_string()),
    }
}

/// Always returns the same snapshot and records every requested location.
pub struct StaticWeatherService {
    data: WeatherData,
    requests: Mutex<Vec<Location>>,
}

impl StaticWeatherService {
    pub fn new(data: WeatherData) -> Self {
        Self {
            data,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested_locations(&self) -> Vec<Location> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherService for StaticWeatherService {
    fn name(&self) -> &str {
        "static"
    }

    async fn get_current_weather(&self, location: &Location) -> Result<WeatherData, ServiceError> {
        self.requests.lock().unwrap().push(location.clone());
        Ok(self.data.clone())
    }
}

/// Fails every request with a network error.
pub struct FailingWeatherService;

#[async_trait]
impl WeatherService for FailingWeatherService {
    fn name(&self) -> &str {
        "failing"
    }

    async fn get_current_weather(&self, _location: &Location) -> Result<WeatherData, ServiceError> {
        Err(ServiceError::Network("connection refused".to_string()))
    }
}

/// Each request blocks until the test releases it, so tests control the
/// order in which overlapping fetches complete.
pub struct GatedWeatherService {
    gates: Mutex<Vec<Option<oneshot::Sender<Result<WeatherData, ServiceError>>>>>,
}

impl Default for GatedWeatherService {
    fn default() -> Self {
        Self::new()
    }
}

impl GatedWeatherService {
    pub fn new() -> Self {
        Self {
            gates: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.gates.lock().unwrap().len()
    }

    /// Yield until at least `n` requests are blocked on their gates.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.call_count() < n {
            tokio::task::yield_now().await;
        }
    }

    /// True if request `call` is still blocked and someone is waiting on it.
    pub fn is_waiting(&self, call: usize) -> bool {
        self.gates
            .lock()
            .unwrap()
            .get(call)
            .and_then(|gate| gate.as_ref())
            .is_some_and(|sender| !sender.is_closed())
    }

    /// Complete request `call` with `result`. Returns false if the request
    /// does not exist, was already released, or its caller went away.
    pub fn release(&self, call: usize, result: Result<WeatherData, ServiceError>) -> bool {
        let sender = self
            .gates
            .lock()
            .unwrap()
            .get_mut(call)
            .and_then(|gate| gate.take());
        match sender {
            Some(sender) => sender.send(result).is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl WeatherService for GatedWeatherService {
    fn name(&self) -> &str {
        "gated"
    }

    async fn get_current_weather(&self, _location: &Location) -> Result<WeatherData, ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push(Some(tx));
        rx.await
            .unwrap_or_else(|_| Err(ServiceError::Network("gate dropped".to_string())))
    }
}

/// Answers every request with the same response.
pub struct StaticQuotesService {
    response: Result<Option<Quote>, ServiceError>,
    calls: AtomicUsize,
}

impl StaticQuotesService {
    pub fn new(response: Result<Option<Quote>, ServiceError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuotesService for StaticQuotesService {
    fn name(&self) -> &str {
        "static"
    }

    async fn get_random_quote(&self) -> Result<Option<Quote>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// Reachability controlled by the test.
pub struct ScriptedProbe {
    reachable: AtomicBool,
}

impl ScriptedProbe {
    pub fn new(reachable: bool) -> Self {
        Self {
            reachable: AtomicBool::new(reachable),
        }
    }

    pub fn set(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReachabilityProbe for ScriptedProbe {
    fn describe(&self) -> String {
        "scripted".to_string()
    }

    async fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }
}

/// Repositories wired to fake services, the way `tui::run` wires real ones.
pub struct TestHarness<W, Q> {
    pub weather_service: Arc<W>,
    pub quotes_service: Arc<Q>,
    pub network: Arc<NetworkRepository>,
    pub weather: Arc<WeatherRepository>,
    pub quotes: Arc<QuotesRepository>,
}

impl TestHarness<StaticWeatherService, StaticQuotesService> {
    pub fn new() -> Self {
        Self::with_services(
            Arc::new(StaticWeatherService::new(sample_weather())),
            Arc::new(StaticQuotesService::new(Ok(Some(sample_quote())))),
        )
    }
}

impl<W, Q> TestHarness<W, Q>
where
    W: WeatherService + 'static,
    Q: QuotesService + 'static,
{
    pub fn with_services(weather_service: Arc<W>, quotes_service: Arc<Q>) -> Self {
        let weather = Arc::new(WeatherRepository::new(
            weather_service.clone(),
            test_location(),
        ));
        let quotes = Arc::new(QuotesRepository::new(quotes_service.clone()));
        Self {
            weather_service,
            quotes_service,
            network: Arc::new(NetworkRepository::new()),
            weather,
            quotes,
        }
    }

    pub fn view_model(&self) -> HomeViewModel {
        HomeViewModel::new(self.weather.clone(), self.quotes.clone(), &self.network)
    }
}
