//! Trip planning backend
//!
//! This library aggregates three external data sources - geocoding,
//! nearby-hotel search and current weather - into one composite trip plan
//! response, plus a locally simulated taxi booking confirmation.

pub mod api;
pub mod config;
pub mod distance;
pub mod error;
pub mod gateway;
pub mod models;
pub mod planner;
pub mod taxi;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::TripPlanError;
pub use gateway::ProviderGateway;
pub use models::{Coordinates, CurrentWeather, DistanceKm, Hotel, TaxiBooking, TripPlan};
pub use planner::TripPlanner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlanError>;
