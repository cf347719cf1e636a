//! Great-circle distance between two coordinates.
//!
//! Spherical-earth haversine. Accurate to well under 0.5% at UK scale, which
//! is far below the precision of a postcode centroid.

use motorscout_core::Coordinate;

/// Mean earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3_958.8;

/// Haversine distance in miles between `a` and `b`.
///
/// Symmetric, zero for identical points, defined for every finite pair.
/// Range validation is the caller's job.
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Float error can push h a hair past 1.0 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_MILES * c
}
