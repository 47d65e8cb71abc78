//! Trip plan orchestration
//!
//! Sequential pipeline: validate, geocode, hotel search, weather lookup,
//! taxi simulation, assembly. Each step gates on the previous one; hotel
//! and weather lookups both need the geocoded coordinates, so there is
//! nothing to run in parallel within one request.

use tracing::{info, instrument};

use crate::error::TripPlanError;
use crate::gateway::ProviderGateway;
use crate::models::TripPlan;
use crate::taxi;

/// Orchestrates one trip planning request end to end
pub struct TripPlanner {
    gateway: ProviderGateway,
}

impl TripPlanner {
    #[must_use]
    pub fn new(gateway: ProviderGateway) -> Self {
        Self { gateway }
    }

    /// Build a complete trip plan for a free-text location.
    ///
    /// An empty location is rejected before any external call. A location
    /// that geocodes to nothing propagates as not-found; any transport or
    /// parse failure short-circuits the pipeline, and no partial plan is
    /// returned in that case.
    #[instrument(skip(self))]
    pub async fn plan_trip(&self, location: &str) -> crate::Result<TripPlan> {
        let location = location.trim();
        if location.is_empty() {
            return Err(TripPlanError::validation("Location is required"));
        }

        let coordinates = self.gateway.geocode(location).await?;

        // Always attempted after a successful geocode; zero hotels and
        // absent weather are both valid outcomes.
        let hotels = self.gateway.find_nearby_hotels(coordinates).await?;
        let weather = self.gateway.fetch_weather(coordinates).await?;

        let taxi_booking = taxi::simulate_booking(&mut rand::rng(), location);

        info!(
            hotels = hotels.len(),
            weather = weather.is_some(),
            "trip plan assembled for '{}'",
            location
        );

        Ok(TripPlan {
            location: location.to_string(),
            coordinates,
            hotels,
            weather,
            taxi_booking,
        })
    }
}
