//! Test fixtures for route-flythrough.
//!
//! Provides a small directions route on the Las Vegas Strip with its
//! decoded coordinates, plus stub providers that never touch the network.

pub mod las_vegas_route;
pub mod stubs;

pub use las_vegas_route::*;
