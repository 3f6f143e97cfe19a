pub mod open_meteo;
pub mod quotable;

pub use open_meteo::OpenMeteoService;
pub use quotable::QuotableService;
