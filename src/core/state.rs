//! # Home State
//!
//! Everything the home screen shows that the view-model owns.
//!
//! ```text
//! HomeState
//! ├── loading: bool                     // a weather fetch is running
//! ├── weather_fetches_in_flight: usize  // how many
//! ├── quote_info: Quote                 // last fetched quote
//! ├── update_time: Option<DateTime>     // last completed weather fetch
//! └── has_network: bool                 // last observed reachability
//! ```
//!
//! The weather snapshot itself is not here: it lives in the
//! `WeatherRepository` signal and the view-model only reads it.
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{DateTime, Local};

use crate::data::types::Quote;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub loading: bool,
    pub weather_fetches_in_flight: usize,
    pub quote_info: Quote,
    pub update_time: Option<DateTime<Local>>,
    pub has_network: bool,
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeState {
    pub fn new() -> Self {
        Self {
            loading: false,
            weather_fetches_in_flight: 0,
            quote_info: Quote::placeholder(),
            update_time: None,
            has_network: false,
        }
    }
}
