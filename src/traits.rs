//! Seams between the point pipeline and the network services around it.
//!
//! The HTTP clients in [`crate::directions`] and [`crate::streetview`]
//! implement these; tests and alternative backends can supply their own.

use crate::error::FlythroughError;
use crate::geometry::Coordinate;
use crate::route::Route;

/// Provides a driving route between two free-form addresses.
pub trait DirectionsProvider {
    fn route_between(&self, origin: &str, destination: &str) -> Result<Route, FlythroughError>;
}

/// Provides street-level imagery for a point looking along a heading.
///
/// `Sync` so frames can be fetched from several worker threads at once.
pub trait ImageryProvider: Sync {
    /// Address of the image, for callers that only want to list frames.
    fn frame_url(&self, point: Coordinate, heading: f64) -> String;

    /// Raw image bytes for the frame.
    fn fetch_frame(&self, point: Coordinate, heading: f64) -> Result<Vec<u8>, FlythroughError>;
}
