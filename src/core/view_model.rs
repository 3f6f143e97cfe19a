//! # Home View-Model
//!
//! Owns `HomeState`, re-exposes the weather and network signals, and runs
//! the two independent fetch operations.
//!
//! ```text
//!  UI loop ──▶ refresh() / process_pending()
//!                 │
//!                 ▼
//!          update(state, action) ──▶ Effect::FetchAll
//!                 ▲                        │
//!                 │                        ▼
//!          Action channel ◀── spawned fetch tasks (TaskScope)
//! ```
//!
//! Fetch tasks never touch `HomeState`. They report back through the action
//! channel and the UI loop applies the result, so the reducer is the only
//! writer.

use std::sync::Arc;

use chrono::Local;
use log::{debug, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::core::action::{Action, Effect, update};
use crate::core::scope::TaskScope;
use crate::core::signal::Observer;
use crate::core::state::HomeState;
use crate::data::repositories::{NetworkRepository, QuotesRepository, WeatherRepository};
use crate::data::types::WeatherData;

pub struct HomeViewModel {
    state: HomeState,
    weather_repository: Arc<WeatherRepository>,
    quotes_repository: Arc<QuotesRepository>,
    weather_data: Observer<Option<WeatherData>>,
    internet_access: Observer<bool>,
    scope: TaskScope,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
}

impl HomeViewModel {
    pub fn new(
        weather_repository: Arc<WeatherRepository>,
        quotes_repository: Arc<QuotesRepository>,
        network_repository: &NetworkRepository,
    ) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            state: HomeState::new(),
            weather_data: weather_repository.weather_flow(),
            internet_access: network_repository.network_status(),
            weather_repository,
            quotes_repository,
            scope: TaskScope::new("home"),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    /// Latest weather snapshot from the repository.
    pub fn weather_data(&self) -> Option<WeatherData> {
        self.weather_data.current()
    }

    /// Latest reachability value from the repository.
    pub fn internet_access(&self) -> bool {
        self.internet_access.current()
    }

    /// Sync with the current network status. Call once when the screen opens:
    /// if the network is already up, this triggers the initial fetch.
    pub fn start(&mut self) -> Effect {
        let available = self.internet_access.current();
        self.dispatch(Action::NetworkChanged(available))
    }

    /// Apply an action and carry out its effect.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        let effect = update(&mut self.state, action);
        if effect == Effect::FetchAll {
            self.fetch_weather_data();
            self.fetch_quote();
        }
        effect
    }

    pub fn network_changed(&mut self, available: bool) -> Effect {
        self.dispatch(Action::NetworkChanged(available))
    }

    /// Manual refresh gesture. Does nothing while offline.
    pub fn refresh(&mut self) -> Effect {
        self.dispatch(Action::Refresh)
    }

    /// Fetch weather in the background. `loading` stays true until every
    /// started fetch has finished.
    pub fn fetch_weather_data(&mut self) {
        if self.scope.is_cancelled() {
            debug!("View-model shut down, ignoring weather fetch");
            return;
        }
        update(&mut self.state, Action::WeatherFetchStarted);

        let repository = Arc::clone(&self.weather_repository);
        let tx = self.tx.clone();
        self.scope.spawn(async move {
            let result = repository.fetch_weather_data().await;
            let completed_at = Local::now();
            if tx
                .send(Action::WeatherFetchFinished {
                    completed_at,
                    result,
                })
                .is_err()
            {
                warn!("Failed to report weather fetch: receiver dropped");
            }
        });
    }

    /// Fetch a quote in the background. No loading indicator.
    pub fn fetch_quote(&mut self) {
        if self.scope.is_cancelled() {
            debug!("View-model shut down, ignoring quote fetch");
            return;
        }
        let repository = Arc::clone(&self.quotes_repository);
        let tx = self.tx.clone();
        self.scope.spawn(async move {
            let result = repository.fetch_quote().await;
            if tx.send(Action::QuoteFetched(result)).is_err() {
                warn!("Failed to report quote fetch: receiver dropped");
            }
        });
    }

    /// Apply everything that happened since the last call: network
    /// transitions, new weather snapshots and finished fetches.
    /// Returns true if anything changed (the screen needs a redraw).
    pub fn process_pending(&mut self) -> bool {
        let mut changed = false;
        while let Some(available) = self.internet_access.try_next() {
            self.network_changed(available);
            changed = true;
        }
        while self.weather_data.try_next().is_some() {
            changed = true;
        }
        while let Ok(action) = self.rx.try_recv() {
            debug!("View-model received: {:?}", action);
            self.dispatch(action);
            changed = true;
        }
        changed
    }

    /// Wait for the next finished fetch and apply it.
    pub async fn next_update(&mut self) -> Option<Effect> {
        let action = self.rx.recv().await?;
        debug!("View-model received: {:?}", action);
        Some(self.dispatch(action))
    }

    /// Cancel every in-flight fetch. Further fetch requests are ignored.
    pub fn shutdown(&mut self) {
        self.scope.cancel();
    }

    pub fn active_tasks(&self) -> usize {
        self.scope.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::service::ServiceError;
    use crate::data::types::Quote;
    use crate::test_support::{
        FailingWeatherService, GatedWeatherService, StaticQuotesService, StaticWeatherService,
        TestHarness, sample_quote, sample_weather,
    };

    /// Apply the next `n` finished fetches.
    async fn settle(vm: &mut HomeViewModel, n: usize) {
        for _ in 0..n {
            vm.next_update().await.expect("action channel closed");
        }
    }

    #[tokio::test]
    async fn test_initial_state() {
        let harness = TestHarness::new();
        let vm = harness.view_model();

        assert!(vm.weather_data().is_none());
        assert_eq!(vm.state().quote_info, Quote::new("Content", "Author"));
        assert!(vm.state().update_time.is_none());
        assert!(!vm.state().loading);
        assert!(!vm.internet_access());
    }

    #[tokio::test]
    async fn test_network_becomes_available_runs_both_fetches() {
        let harness = TestHarness::new();
        let mut vm = harness.view_model();

        harness.network.report(true);
        assert!(vm.process_pending());

        assert!(vm.state().loading);
        assert!(vm.state().update_time.is_none());

        settle(&mut vm, 2).await;

        assert!(!vm.state().loading);
        assert!(vm.state().update_time.is_some());
        assert_eq!(vm.weather_data(), Some(sample_weather()));
        assert_eq!(vm.state().quote_info, sample_quote());
        assert_eq!(harness.weather_service.call_count(), 1);
        assert_eq!(harness.quotes_service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_start_with_network_already_up_fetches_once() {
        let harness = TestHarness::new();
        harness.network.report(true);
        let mut vm = harness.view_model();

        assert_eq!(vm.start(), Effect::FetchAll);
        // The transition was published before the view-model subscribed,
        // so there is nothing pending that could trigger a second fetch.
        vm.process_pending();
        settle(&mut vm, 2).await;

        assert_eq!(harness.weather_service.call_count(), 1);
        assert_eq!(harness.quotes_service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_start_offline_does_nothing() {
        let harness = TestHarness::new();
        let mut vm = harness.view_model();

        assert_eq!(vm.start(), Effect::None);
        assert_eq!(vm.active_tasks(), 0);
        assert!(!vm.state().loading);
    }

    #[tokio::test]
    async fn test_each_transition_triggers_exactly_once() {
        let harness = TestHarness::new();
        let mut vm = harness.view_model();

        harness.network.report(true);
        harness.network.report(true);
        vm.process_pending();
        settle(&mut vm, 2).await;
        assert_eq!(harness.weather_service.call_count(), 1);

        harness.network.report(false);
        harness.network.report(true);
        vm.process_pending();
        settle(&mut vm, 2).await;
        assert_eq!(harness.weather_service.call_count(), 2);
        assert_eq!(harness.quotes_service.call_count(), 2);
    }

    #[tokio::test]
    async fn test_refresh_offline_changes_nothing() {
        let harness = TestHarness::new();
        let mut vm = harness.view_model();
        let before = vm.state().clone();

        assert_eq!(vm.refresh(), Effect::None);

        assert_eq!(vm.state(), &before);
        assert_eq!(vm.active_tasks(), 0);
        tokio::task::yield_now().await;
        assert_eq!(harness.weather_service.call_count(), 0);
        assert_eq!(harness.quotes_service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_online_fetches_again() {
        let harness = TestHarness::new();
        let mut vm = harness.view_model();
        harness.network.report(true);
        vm.process_pending();
        settle(&mut vm, 2).await;

        assert_eq!(vm.refresh(), Effect::FetchAll);
        assert!(vm.state().loading);
        settle(&mut vm, 2).await;

        assert!(!vm.state().loading);
        assert_eq!(harness.weather_service.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_quote_body_yields_fallback() {
        let harness = TestHarness::with_services(
            Arc::new(StaticWeatherService::new(sample_weather())),
            Arc::new(StaticQuotesService::new(Ok(None))),
        );
        let mut vm = harness.view_model();

        vm.fetch_quote();
        settle(&mut vm, 1).await;

        assert_eq!(vm.state().quote_info, Quote::new("No quote", "No author"));
    }

    #[tokio::test]
    async fn test_quote_failure_keeps_placeholder() {
        let harness = TestHarness::with_services(
            Arc::new(StaticWeatherService::new(sample_weather())),
            Arc::new(StaticQuotesService::new(Err(ServiceError::Api {
                status: 503,
                message: "down".to_string(),
            }))),
        );
        let mut vm = harness.view_model();

        vm.fetch_quote();
        settle(&mut vm, 1).await;

        assert_eq!(vm.state().quote_info, Quote::placeholder());
    }

    #[tokio::test]
    async fn test_failed_weather_fetch_resets_loading() {
        let harness = TestHarness::with_services(
            Arc::new(FailingWeatherService),
            Arc::new(StaticQuotesService::new(Ok(None))),
        );
        let mut vm = harness.view_model();

        vm.fetch_weather_data();
        assert!(vm.state().loading);
        settle(&mut vm, 1).await;

        assert!(!vm.state().loading);
        assert!(vm.state().update_time.is_some());
        assert!(vm.weather_data().is_none());
    }

    #[tokio::test]
    async fn test_overlapping_weather_fetches_never_stick_loading() {
        let gated = Arc::new(GatedWeatherService::new());
        let harness = TestHarness::with_services(
            gated.clone(),
            Arc::new(StaticQuotesService::new(Ok(None))),
        );
        let mut vm = harness.view_model();

        vm.fetch_weather_data();
        vm.fetch_weather_data();
        assert_eq!(vm.state().weather_fetches_in_flight, 2);
        gated.wait_for_calls(2).await;

        // Second call finishes first: the first is still running.
        assert!(gated.release(1, Ok(sample_weather())));
        settle(&mut vm, 1).await;
        assert!(vm.state().loading);
        assert!(vm.state().update_time.is_some());

        assert!(gated.release(0, Ok(sample_weather())));
        settle(&mut vm, 1).await;
        assert!(!vm.state().loading);
        assert_eq!(vm.state().weather_fetches_in_flight, 0);
    }

    #[tokio::test]
    async fn test_weather_publish_marks_screen_changed() {
        let harness = TestHarness::new();
        let mut vm = harness.view_model();

        harness.weather.fetch_weather_data().await.unwrap();

        assert!(vm.process_pending());
        assert!(!vm.process_pending());
        assert_eq!(vm.weather_data(), Some(sample_weather()));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_fetches() {
        let gated = Arc::new(GatedWeatherService::new());
        let harness = TestHarness::with_services(
            gated.clone(),
            Arc::new(StaticQuotesService::new(Ok(None))),
        );
        let mut vm = harness.view_model();

        vm.fetch_weather_data();
        gated.wait_for_calls(1).await;
        vm.shutdown();

        // The aborted task dropped its gate receiver.
        for _ in 0..10 {
            if !gated.is_waiting(0) {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(!gated.is_waiting(0));

        // Requests after shutdown are ignored instead of leaving loading stuck.
        let before = vm.state().clone();
        vm.fetch_weather_data();
        vm.fetch_quote();
        assert_eq!(vm.state(), &before);
        assert_eq!(vm.active_tasks(), 0);
    }
}
