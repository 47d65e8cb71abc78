//! External provider gateway
//!
//! Sequential HTTP calls to the geocoding, place-search and weather
//! providers, normalizing each provider's response shape into the internal
//! result types. No retries and no circuit breaking; transport failures
//! propagate upward as provider errors.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::ProvidersConfig;
use crate::distance;
use crate::error::TripPlanError;
use crate::models::{Coordinates, CurrentWeather, DistanceKm, Hotel};

/// Gateway to the three external providers.
///
/// Holds one HTTP client with a bounded per-request timeout; a timeout is
/// treated like any other transport failure.
pub struct ProviderGateway {
    client: reqwest::Client,
    config: ProvidersConfig,
}

impl ProviderGateway {
    /// Create a new gateway from provider configuration
    pub fn new(config: ProvidersConfig) -> crate::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("trip-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripPlanError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Resolve a free-text location into coordinates.
    ///
    /// Zero candidate matches are a distinct not-found outcome, kept apart
    /// from transport errors so the boundary can answer 404.
    #[instrument(skip(self))]
    pub async fn geocode(&self, location: &str) -> crate::Result<Coordinates> {
        let url = format!(
            "{}?text={}&apiKey={}",
            self.config.geocoding_url,
            urlencoding::encode(location),
            self.config.geoapify_api_key
        );

        let response: geoapify::FeatureCollection = self.get_json(&url, "geocoding").await?;

        let Some(feature) = response.features.into_iter().next() else {
            return Err(TripPlanError::not_found(location));
        };

        let (lat, lon) = feature
            .properties
            .lat
            .zip(feature.properties.lon)
            .ok_or_else(|| TripPlanError::provider("geocoding response missing coordinates"))?;

        let coordinates = Coordinates::new(lat, lon);
        if !coordinates.is_finite() {
            return Err(TripPlanError::provider(format!(
                "geocoding returned non-finite coordinates for '{location}'"
            )));
        }

        debug!("geocoded '{}' to {}", location, coordinates.format());
        Ok(coordinates)
    }

    /// Search for hotels within the configured radius of the origin,
    /// annotating each record with its great-circle distance.
    #[instrument(skip(self))]
    pub async fn find_nearby_hotels(&self, origin: Coordinates) -> crate::Result<Vec<Hotel>> {
        let url = format!(
            "{}?categories=accommodation.hotel&filter=circle:{},{},{}&limit={}&apiKey={}",
            self.config.places_url,
            origin.lon,
            origin.lat,
            self.config.hotel_radius_m,
            self.config.max_hotels,
            self.config.geoapify_api_key
        );

        let response: geoapify::FeatureCollection = self.get_json(&url, "place search").await?;

        let hotels: Vec<Hotel> = response
            .features
            .into_iter()
            .map(|feature| hotel_from_properties(origin, feature.properties))
            .collect();

        debug!(count = hotels.len(), "hotel search complete");
        Ok(hotels)
    }

    /// Fetch current weather conditions at the given coordinates.
    ///
    /// A response without a `current` block (Weatherstack also reports its
    /// own errors this way, with HTTP 200) yields `Ok(None)`; the trip plan
    /// still succeeds without weather data.
    #[instrument(skip(self))]
    pub async fn fetch_weather(
        &self,
        coordinates: Coordinates,
    ) -> crate::Result<Option<CurrentWeather>> {
        let url = format!(
            "{}?access_key={}&query={},{}",
            self.config.weather_url,
            self.config.weatherstack_api_key,
            coordinates.lat,
            coordinates.lon
        );

        let response: weatherstack::CurrentResponse = self.get_json(&url, "weather").await?;

        let Some(current) = response.current else {
            warn!("no current weather data for {}", coordinates.format());
            return Ok(None);
        };

        Ok(Some(CurrentWeather {
            temperature: current.temperature,
            description: current
                .weather_descriptions
                .into_iter()
                .next()
                .unwrap_or_default(),
            wind_speed: current.wind_speed,
            humidity: current.humidity,
        }))
    }

    /// Issue a GET request and deserialize the JSON body.
    ///
    /// The URL carries the API key as a query parameter, so only the
    /// provider name goes into log output.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, provider: &str) -> crate::Result<T> {
        debug!(provider, "sending provider request");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TripPlanError::provider(format!(
                "{provider} request failed with status {status}"
            )));
        }

        response.json().await.map_err(|e| {
            TripPlanError::provider(format!("{provider} returned a malformed payload: {e}"))
        })
    }
}

/// Map a raw place record onto a hotel result.
///
/// Absent name/address fields default to empty strings rather than
/// rejecting the record; unusable coordinates degrade the distance to an
/// "N/A" marker.
fn hotel_from_properties(origin: Coordinates, properties: geoapify::PlaceProperties) -> Hotel {
    let distance = distance::haversine_km(
        origin.lat,
        origin.lon,
        properties.lat.unwrap_or(f64::NAN),
        properties.lon.unwrap_or(f64::NAN),
    );

    Hotel {
        name: properties.name.unwrap_or_default(),
        address: properties.address_line1.unwrap_or_default(),
        distance_km: DistanceKm::from(distance),
        lat: properties.lat,
        lon: properties.lon,
    }
}

/// Geoapify API response structures
mod geoapify {
    use serde::Deserialize;

    /// GeoJSON-style feature collection shared by the geocoding and place
    /// search endpoints
    #[derive(Debug, Deserialize)]
    pub struct FeatureCollection {
        #[serde(default)]
        pub features: Vec<Feature>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Feature {
        pub properties: PlaceProperties,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct PlaceProperties {
        pub name: Option<String>,
        pub address_line1: Option<String>,
        pub lat: Option<f64>,
        pub lon: Option<f64>,
    }
}

/// Weatherstack API response structures
mod weatherstack {
    use serde::Deserialize;

    /// Current-conditions response. Error payloads come back as HTTP 200
    /// without a `current` block.
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub current: Option<CurrentData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        pub temperature: f64,
        #[serde(default)]
        pub weather_descriptions: Vec<String>,
        pub wind_speed: f64,
        pub humidity: f64,
    }
}
