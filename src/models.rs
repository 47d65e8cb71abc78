//! Domain and wire types for trip plan responses
//!
//! All of these are request-scoped values; a `TripPlan` is assembled per
//! request and never stored.

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components are finite real numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Format coordinates for log output
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Per-hotel distance from the query coordinates.
///
/// Serializes as a JSON number rounded to two decimals, or as the string
/// `"N/A"` when the source record carried unusable coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceKm {
    Km(f64),
    Unavailable,
}

impl From<Option<f64>> for DistanceKm {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unavailable, Self::Km)
    }
}

impl Serialize for DistanceKm {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Km(km) => serializer.serialize_f64(*km),
            Self::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// A hotel near the requested location
#[derive(Debug, Clone, Serialize)]
pub struct Hotel {
    pub name: String,
    pub address: String,
    pub distance_km: DistanceKm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// Current weather conditions at the resolved coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub description: String,
    pub wind_speed: f64,
    pub humidity: f64,
}

/// Simulated taxi booking confirmation; not a real reservation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxiBooking {
    pub taxi_id: String,
    pub eta_minutes: u32,
    pub message: String,
}

/// The aggregate trip planning response
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub location: String,
    pub coordinates: Coordinates,
    pub hotels: Vec<Hotel>,
    pub weather: Option<CurrentWeather>,
    #[serde(rename = "taxiBooking")]
    pub taxi_booking: TaxiBooking,
}
