//! # Home Screen Model
//!
//! Pure function from view-model state to the list of cards on screen.
//! Everything here is plain data so it can be tested without a terminal.
//!
//! ```text
//! online:   Temperature, Precipitation, Quote, LastUpdate
//! offline:  NoNetwork, LastUpdate
//! ```

use chrono::{DateTime, Local, TimeZone, Timelike};

use crate::core::state::HomeState;
use crate::data::types::{Quote, WeatherData};

pub const NO_NETWORK_TEXT: &str = "No internet connection";

#[derive(Debug, Clone, PartialEq)]
pub enum HomeCard {
    NoNetwork,
    Temperature(Option<f64>),
    Precipitation(Option<f64>),
    Quote(Quote),
    LastUpdate(Option<DateTime<Local>>),
}

/// What a card says: a prominent line and an optional caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardText {
    pub primary: String,
    pub secondary: Option<String>,
}

impl HomeCard {
    pub fn text(&self) -> CardText {
        match self {
            HomeCard::NoNetwork => CardText {
                primary: NO_NETWORK_TEXT.to_string(),
                secondary: None,
            },
            HomeCard::Temperature(value) => CardText {
                primary: temperature_text(*value),
                secondary: Some("Temperature".to_string()),
            },
            HomeCard::Precipitation(value) => CardText {
                primary: precipitation_text(*value),
                secondary: Some("Precipitation".to_string()),
            },
            HomeCard::Quote(quote) => CardText {
                primary: quote.content.clone().unwrap_or_else(|| "-".to_string()),
                secondary: Some(quote.author.clone().unwrap_or_else(|| "-".to_string())),
            },
            HomeCard::LastUpdate(time) => CardText {
                primary: last_update_text(time.as_ref()),
                secondary: None,
            },
        }
    }
}

pub fn home_cards(state: &HomeState, weather: Option<&WeatherData>) -> Vec<HomeCard> {
    let mut cards = Vec::with_capacity(4);
    if state.has_network {
        cards.push(HomeCard::Temperature(weather.and_then(|w| w.temperature)));
        cards.push(HomeCard::Precipitation(
            weather.and_then(|w| w.precipitation_probability),
        ));
        cards.push(HomeCard::Quote(state.quote_info.clone()));
    } else {
        cards.push(HomeCard::NoNetwork);
    }
    cards.push(HomeCard::LastUpdate(state.update_time));
    cards
}

fn value_or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_number)
}

/// Whole numbers keep one decimal (`20.0`); anything else uses the shortest
/// form that round-trips (`21.5`).
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

pub fn temperature_text(value: Option<f64>) -> String {
    format!("{}°C", value_or_dash(value))
}

pub fn precipitation_text(value: Option<f64>) -> String {
    format!("{}%", value_or_dash(value))
}

/// `Last update: 9:5` style, unpadded hour and minute.
pub fn last_update_text<Tz: TimeZone>(time: Option<&DateTime<Tz>>) -> String {
    match time {
        Some(t) => format!("Last update: {}:{}", t.hour(), t.minute()),
        None => "Last update: never".to_string(),
    }
}
