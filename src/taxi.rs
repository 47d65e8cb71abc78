//! Simulated taxi booking
//!
//! There is no real dispatch behind this; every request gets a fresh,
//! randomly generated confirmation that is never persisted.

use std::ops::Range;

use rand::Rng;

use crate::models::TaxiBooking;

const TAXI_ID_PREFIX: &str = "TX";
const TAXI_ID_RANGE: Range<u32> = 0..10_000;
const ETA_MINUTES_RANGE: Range<u32> = 5..20;

/// Generate a booking confirmation for the given destination.
///
/// The RNG is injected so tests can seed it and assert the ID and ETA
/// ranges deterministically.
pub fn simulate_booking<R: Rng>(rng: &mut R, destination: &str) -> TaxiBooking {
    let taxi_id = format!("{TAXI_ID_PREFIX}{}", rng.random_range(TAXI_ID_RANGE));
    let eta_minutes = rng.random_range(ETA_MINUTES_RANGE);

    TaxiBooking {
        taxi_id,
        eta_minutes,
        message: format!("Taxi booked to {destination}, arriving in approx {eta_minutes} minutes."),
    }
}
