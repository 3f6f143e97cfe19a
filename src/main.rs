use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use weather_mvp::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "weather-mvp", about = "Current weather and a quote, in your terminal")]
struct Args {
    /// Latitude of the forecast location
    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<f64>,

    /// Longitude of the forecast location
    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,

    /// Display name for the location (shown in the title bar)
    #[arg(long)]
    location_name: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger first so config warnings land in the log too.
    // Everything passes until the configured level is known.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("weather-mvp.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }

    let file_config = config::load_config().map_err(|e| {
        log::error!("Failed to load config: {}", e);
        std::io::Error::other(e)
    })?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            latitude: args.latitude,
            longitude: args.longitude,
            location_name: args.location_name,
        },
    );
    log::set_max_level(resolved.log_level);

    log::info!(
        "Weather MVP starting up for {} ({}, {})",
        resolved.location.label(),
        resolved.location.latitude,
        resolved.location.longitude
    );

    weather_mvp::tui::run(resolved)
}
