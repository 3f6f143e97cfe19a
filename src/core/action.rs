//! # Actions
//!
//! Everything that can happen on the home screen becomes an `Action`.
//! Network comes back? That's `Action::NetworkChanged(true)`.
//! A weather fetch finishes? That's `Action::WeatherFetchFinished { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` telling the caller what to do next.
//! No I/O here: spawning fetches is the view-model's job.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::state::HomeState;
use crate::data::service::ServiceError;
use crate::data::types::Quote;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Latest reachability observation.
    NetworkChanged(bool),
    /// Manual refresh gesture.
    Refresh,
    WeatherFetchStarted,
    /// A weather fetch completed, successfully or not.
    WeatherFetchFinished {
        completed_at: DateTime<Local>,
        result: Result<(), ServiceError>,
    },
    QuoteFetched(Result<Quote, ServiceError>),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start a weather fetch and a quote fetch.
    FetchAll,
    Quit,
}

pub fn update(state: &mut HomeState, action: Action) -> Effect {
    match action {
        Action::NetworkChanged(available) => {
            let was_available = state.has_network;
            state.has_network = available;
            if available && !was_available {
                info!("Network became available, fetching weather and quote");
                Effect::FetchAll
            } else {
                Effect::None
            }
        }
        Action::Refresh => {
            if state.has_network {
                info!("Manual refresh");
                Effect::FetchAll
            } else {
                debug!("Refresh ignored: no network");
                Effect::None
            }
        }
        Action::WeatherFetchStarted => {
            state.weather_fetches_in_flight += 1;
            state.loading = true;
            Effect::None
        }
        Action::WeatherFetchFinished {
            completed_at,
            result,
        } => {
            if let Err(e) = result {
                warn!("Weather fetch failed: {}", e);
            }
            // Set on failure too; the card placeholders hide the difference.
            state.update_time = Some(completed_at);
            state.weather_fetches_in_flight = state.weather_fetches_in_flight.saturating_sub(1);
            state.loading = state.weather_fetches_in_flight > 0;
            Effect::None
        }
        Action::QuoteFetched(Ok(quote)) => {
            debug!("Quote updated: {:?}", quote);
            state.quote_info = quote;
            Effect::None
        }
        Action::QuoteFetched(Err(e)) => {
            warn!("Quote fetch failed, keeping previous quote: {}", e);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
