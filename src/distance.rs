//! Great-circle distance between coordinate pairs

use tracing::warn;

/// Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers, rounded to two decimal places.
///
/// Returns `None` when any input is non-finite. One malformed hotel record
/// must not abort the whole trip plan, so the caller maps `None` to an
/// "N/A" marker instead of failing the request.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Option<f64> {
    if ![lat1, lon1, lat2, lon2].iter().all(|v| v.is_finite()) {
        warn!(lat1, lon1, lat2, lon2, "invalid coordinates for distance calculation");
        return None;
    }

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Some(round_two_decimals(EARTH_RADIUS_KM * c))
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
