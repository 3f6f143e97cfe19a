//! # Data Layer
//!
//! Remote services and the repositories that sit on top of them.
//!
//! ```text
//! repositories/   (what the view-model talks to)
//!      │
//!      ▼
//! service.rs      (WeatherService / QuotesService traits)
//!      │
//!      ▼
//! services/       (Open-Meteo, Quotable over reqwest)
//! ```

pub mod repositories;
pub mod service;
pub mod services;
pub mod types;

pub use repositories::{NetworkRepository, QuotesRepository, WeatherRepository};
pub use service::{QuotesService, ServiceError, WeatherService};
pub use services::{OpenMeteoService, QuotableService};
pub use types::{Location, Quote, WeatherData};
