//! Offline stand-ins for the directions and imagery services.

use std::sync::atomic::{AtomicUsize, Ordering};

use route_flythrough::error::FlythroughError;
use route_flythrough::geometry::Coordinate;
use route_flythrough::route::Route;
use route_flythrough::traits::{DirectionsProvider, ImageryProvider};

/// Returns the same route for any pair of addresses.
pub struct FixedDirections(pub Route);

impl DirectionsProvider for FixedDirections {
    fn route_between(&self, _origin: &str, _destination: &str) -> Result<Route, FlythroughError> {
        Ok(self.0.clone())
    }
}

/// Serves a frame body that spells out the requested point and heading.
#[derive(Default)]
pub struct EchoImagery {
    pub fetches: AtomicUsize,
    /// Fail the fetch with this index (counted in request order).
    pub fail_on: Option<usize>,
}

impl EchoImagery {
    pub fn body(point: Coordinate, heading: f64) -> Vec<u8> {
        format!("{:.5},{:.5}@{:.1}", point.lat, point.lng, heading).into_bytes()
    }
}

impl ImageryProvider for EchoImagery {
    fn frame_url(&self, point: Coordinate, heading: f64) -> String {
        format!("stub://frame?location={},{}&heading={:.2}", point.lat, point.lng, heading)
    }

    fn fetch_frame(&self, point: Coordinate, heading: f64) -> Result<Vec<u8>, FlythroughError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(n) {
            return Err(FlythroughError::Service {
                status: "UNKNOWN_ERROR".to_string(),
                message: format!("fetch {} refused", n),
            });
        }
        Ok(Self::body(point, heading))
    }
}
