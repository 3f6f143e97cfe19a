pub mod network;
pub mod quotes;
pub mod weather;

pub use network::{NetworkRepository, ReachabilityProbe, TcpProbe};
pub use quotes::QuotesRepository;
pub use weather::WeatherRepository;
