//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.weather-mvp/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::data::services::open_meteo::DEFAULT_OPEN_METEO_BASE_URL;
use crate::data::services::quotable::DEFAULT_QUOTABLE_BASE_URL;
use crate::data::types::Location;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WeatherMvpConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WeatherConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuotesConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NetworkConfig {
    pub probe_address: Option<String>,
    pub probe_interval_secs: Option<u64>,
    pub probe_timeout_ms: Option<u64>,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Berlin, where the forecast is as good a default as any.
pub const DEFAULT_LATITUDE: f64 = 52.52;
pub const DEFAULT_LONGITUDE: f64 = 13.41;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_PROBE_ADDRESS: &str = "1.1.1.1:443";
pub const DEFAULT_PROBE_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1500;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub location: Location,
    pub weather_base_url: String,
    pub request_timeout: Duration,
    pub quotes_base_url: String,
    pub probe_address: String,
    pub probe_interval: Duration,
    pub probe_timeout: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.weather-mvp/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".weather-mvp").join("config.toml"))
}

/// Load config from `~/.weather-mvp/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WeatherMvpConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WeatherMvpConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WeatherMvpConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path, generating a default if it is missing.
pub fn load_config_from(path: &Path) -> Result<WeatherMvpConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WeatherMvpConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WeatherMvpConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Weather MVP Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                 # "error", "warn", "info", "debug", "trace", "off"

# [location]
# latitude = 52.52                    # Or set WEATHER_MVP_LATITUDE
# longitude = 13.41                   # Or set WEATHER_MVP_LONGITUDE
# name = "Berlin"

# [weather]
# base_url = "https://api.open-meteo.com/v1"   # Or set WEATHER_BASE_URL
# request_timeout_secs = 15

# [quotes]
# base_url = "https://api.quotable.io"         # Or set QUOTES_BASE_URL

# [network]
# probe_address = "1.1.1.1:443"       # Or set NETWORK_PROBE_ADDRESS
# probe_interval_secs = 5
# probe_timeout_ms = 1500
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WeatherMvpConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Coordinates: CLI → env → config → default
    let latitude = cli
        .latitude
        .or_else(|| env_parse("WEATHER_MVP_LATITUDE"))
        .or(config.location.latitude)
        .unwrap_or(DEFAULT_LATITUDE);
    let longitude = cli
        .longitude
        .or_else(|| env_parse("WEATHER_MVP_LONGITUDE"))
        .or(config.location.longitude)
        .unwrap_or(DEFAULT_LONGITUDE);
    let name = cli
        .location_name
        .clone()
        .or_else(|| config.location.name.clone());

    // Service URLs: env → config → default
    let weather_base_url = std::env::var("WEATHER_BASE_URL")
        .ok()
        .or_else(|| config.weather.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPEN_METEO_BASE_URL.to_string());
    let quotes_base_url = std::env::var("QUOTES_BASE_URL")
        .ok()
        .or_else(|| config.quotes.base_url.clone())
        .unwrap_or_else(|| DEFAULT_QUOTABLE_BASE_URL.to_string());

    let probe_address = std::env::var("NETWORK_PROBE_ADDRESS")
        .ok()
        .or_else(|| config.network.probe_address.clone())
        .unwrap_or_else(|| DEFAULT_PROBE_ADDRESS.to_string());

    ResolvedConfig {
        log_level: resolve_log_level(config.general.log_level.as_deref()),
        location: Location {
            latitude,
            longitude,
            name,
        },
        weather_base_url,
        request_timeout: Duration::from_secs(
            config
                .weather
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        quotes_base_url,
        probe_address,
        probe_interval: Duration::from_secs(
            config
                .network
                .probe_interval_secs
                .unwrap_or(DEFAULT_PROBE_INTERVAL_SECS)
                .max(1),
        ),
        probe_timeout: Duration::from_millis(
            config
                .network
                .probe_timeout_ms
                .unwrap_or(DEFAULT_PROBE_TIMEOUT_MS),
        ),
    }
}

fn env_parse(key: &str) -> Option<f64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: '{}' is not a number", key, raw);
            None
        }
    }
}

fn resolve_log_level(level: Option<&str>) -> LevelFilter {
    match level {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Unknown log level '{}', using {}", raw, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    }
}
