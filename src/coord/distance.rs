//! Haversine great-circle distance
//!
//! Spherical approximation of the Earth with a fixed radius of 6 378 100 m.
//! Good for short and medium distances; no ellipsoidal correction, so long
//! and near-antipodal distances drift from geodesic values.

use crate::constants::geo::EARTH_RADIUS_METERS;
use std::f64::consts::PI;

/// Distance in meters between two points given in degrees.
///
/// Pure and total: identical points give exactly `0.0`, swapping the points
/// gives the same result, and NaN/infinite inputs propagate without error.
///
/// ```
/// use geo_lookup::distance;
///
/// let d = distance(13.7665217, 100.6068431, 13.7199345, 100.5197898);
/// assert!((d - 10_747.27).abs() < 0.01);
/// ```
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let la1 = to_radians(lat1);
    let lo1 = to_radians(lon1);
    let la2 = to_radians(lat2);
    let lo2 = to_radians(lon2);

    let h = haversin(la2 - la1) + la1.cos() * la2.cos() * haversin(lo2 - lo1);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

// Kept as `deg * PI / 180` rather than `f64::to_radians`, which multiplies by a
// pre-rounded constant and can differ in the last bit.
#[inline]
fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// hav(θ) = sin²(θ/2)
#[inline]
fn haversin(theta: f64) -> f64 {
    let s = (theta / 2.0).sin();
    s * s
}
