//! Configuration management for the trip planner
//!
//! Handles loading configuration from files and environment variables and
//! validates all settings before the server starts. Provider credentials
//! are read once here and passed explicitly into the gateway.

use crate::TripPlanError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the trip planner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// External provider configuration
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the static front end
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// External provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Geoapify API key (geocoding and place search)
    #[serde(default)]
    pub geoapify_api_key: String,
    /// Weatherstack API key (current conditions)
    #[serde(default)]
    pub weatherstack_api_key: String,
    /// Geocoding endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Place search endpoint
    #[serde(default = "default_places_url")]
    pub places_url: String,
    /// Current-conditions endpoint
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// Request timeout in seconds, applied per external call
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Hotel search radius in meters
    #[serde(default = "default_hotel_radius")]
    pub hotel_radius_m: u32,
    /// Maximum number of hotel results
    #[serde(default = "default_max_hotels")]
    pub max_hotels: u32,
}

// Default value functions
fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_geocoding_url() -> String {
    "https://api.geoapify.com/v1/geocode/search".to_string()
}

fn default_places_url() -> String {
    "https://api.geoapify.com/v2/places".to_string()
}

fn default_weather_url() -> String {
    // Weatherstack's free tier is plain HTTP only
    "http://api.weatherstack.com/current".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_hotel_radius() -> u32 {
    5000
}

fn default_max_hotels() -> u32 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            geoapify_api_key: String::new(),
            weatherstack_api_key: String::new(),
            geocoding_url: default_geocoding_url(),
            places_url: default_places_url(),
            weather_url: default_weather_url(),
            timeout_seconds: default_timeout(),
            hotel_radius_m: default_hotel_radius(),
            max_hotels: default_max_hotels(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with TRIP_PLANNER prefix, e.g.
        // TRIP_PLANNER__PROVIDERS__GEOAPIFY_API_KEY
        builder = builder.add_source(
            Environment::with_prefix("TRIP_PLANNER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trip-planner").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_urls()?;
        Ok(())
    }

    /// Validate API keys and credentials
    fn validate_api_keys(&self) -> Result<()> {
        if self.providers.geoapify_api_key.trim().is_empty() {
            return Err(TripPlanError::config(
                "Geoapify API key is missing. Set providers.geoapify_api_key or TRIP_PLANNER__PROVIDERS__GEOAPIFY_API_KEY.",
            )
            .into());
        }

        if self.providers.weatherstack_api_key.trim().is_empty() {
            return Err(TripPlanError::config(
                "Weatherstack API key is missing. Set providers.weatherstack_api_key or TRIP_PLANNER__PROVIDERS__WEATHERSTACK_API_KEY.",
            )
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.providers.timeout_seconds == 0 || self.providers.timeout_seconds > 300 {
            return Err(TripPlanError::config(
                "Provider timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.providers.hotel_radius_m == 0 || self.providers.hotel_radius_m > 50_000 {
            return Err(TripPlanError::config(
                "Hotel search radius must be between 1 and 50000 meters",
            )
            .into());
        }

        if self.providers.max_hotels == 0 || self.providers.max_hotels > 20 {
            return Err(TripPlanError::config(
                "Maximum hotel results must be between 1 and 20",
            )
            .into());
        }

        Ok(())
    }

    /// Validate provider endpoint URLs
    fn validate_urls(&self) -> Result<()> {
        for (name, url) in [
            ("geocoding_url", &self.providers.geocoding_url),
            ("places_url", &self.providers.places_url),
            ("weather_url", &self.providers.weather_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripPlanError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
