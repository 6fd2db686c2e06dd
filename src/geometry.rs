//! Planar geometry on latitude/longitude degrees.
//!
//! Distances here treat degrees as Cartesian units. That is only a fair
//! approximation over the short spans between consecutive route points,
//! which is all the interpolation and heading code needs.

use serde::{Deserialize, Serialize};

/// A point in degrees, latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(point: Coordinate) -> Self {
        (point.lat, point.lng)
    }
}

/// Straight-line distance between two points, in degrees.
pub fn euclidean_distance(a: Coordinate, b: Coordinate) -> f64 {
    (a.lat - b.lat).hypot(a.lng - b.lng)
}

/// Compass heading from `from` towards `to`, in degrees within `[0, 360)`.
///
/// North (increasing latitude) is 0 and east (increasing longitude) is 90.
/// Identical points have no direction and yield 0.
pub fn heading(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = to.lat - from.lat;
    let d_lng = to.lng - from.lng;
    if d_lat == 0.0 && d_lng == 0.0 {
        return 0.0;
    }

    let mut degrees = d_lng.atan2(d_lat).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // A tiny negative angle can round up to a full turn.
    if degrees >= 360.0 { 0.0 } else { degrees }
}
