//! Route structure as returned by the directions service.
//!
//! Only the nesting the point stream needs is modelled:
//! `legs[*].steps[*].polyline.points`. Anything missing from that path is a
//! structural error; nothing is defaulted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::points::{points, RoutePoints};

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route does not have the expected legs/steps/polyline shape: {0}")]
    Structure(#[from] serde_json::Error),
}

/// One encoded polyline string, as found under a step's `polyline` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}

impl EncodedPolyline {
    pub fn new(points: impl Into<String>) -> Self {
        Self {
            points: points.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.points
    }
}

/// A maneuver-level segment of a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub polyline: EncodedPolyline,
}

impl Step {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self {
            polyline: EncodedPolyline::new(encoded),
        }
    }
}

/// One origin-to-destination segment of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_address: Option<String>,
}

impl Leg {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            start_address: None,
            end_address: None,
        }
    }
}

impl<'a> IntoIterator for &'a Leg {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub legs: Vec<Leg>,
}

impl Route {
    pub fn new(legs: Vec<Leg>) -> Self {
        Self { legs }
    }

    /// Reads a route from a parsed directions `routes[i]` object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, RouteError> {
        Ok(Self::deserialize(value)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, RouteError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lazily walks every step's points; see [`points`].
    pub fn points(&self, max_gap: f64) -> RoutePoints<'_> {
        points(self, max_gap)
    }

    pub fn step_count(&self) -> usize {
        self.legs.iter().map(|leg| leg.steps.len()).sum()
    }
}
