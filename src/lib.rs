//! route-flythrough core
//!
//! Turns a directions route into a lazy, densified stream of coordinates
//! and the street-level frames along it.

pub mod traits;
pub mod error;
pub mod geometry;
pub mod polyline;
pub mod route;
pub mod points;
pub mod directions;
pub mod streetview;
pub mod flythrough;

pub use error::FlythroughError;
pub use geometry::Coordinate;
pub use points::{collect_points, points, RoutePoints};
pub use route::{EncodedPolyline, Leg, Route, Step};
