//! Great-circle distance on a spherical Earth.
//!
//! Used to measure how far each restaurant sits from the station it was
//! found near. Inputs are not range-checked; request validation happens at
//! the service boundary.

use crate::model::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters.
///
/// Returns exactly `0.0` for identical points and is symmetric in its
/// arguments.
pub fn distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}
