//! Lazy point stream over a whole route.
//!
//! Steps are decoded one at a time as the caller pulls points, so a long
//! route never has more than one step's coordinates in memory. Gaps wider
//! than the configured maximum are filled with evenly spaced synthetic
//! points, emitted before the decoded point that closes the gap.

use std::iter::{Flatten, FusedIterator};
use std::slice;

use tracing::{debug, trace};

use crate::geometry::{euclidean_distance, Coordinate};
use crate::polyline::{decode, DecodeError};
use crate::route::{Leg, Route};

/// Returns the route's points in leg, step, polyline order.
///
/// With `max_gap > 0`, any two consecutive decoded points further apart than
/// `max_gap` (planar degrees) get `ceil(dist / max_gap)` interpolated points
/// inserted before the second one. Interpolation carries across step and leg
/// boundaries. A zero, negative or NaN `max_gap` disables it.
///
/// A malformed step yields its `DecodeError` once and ends the stream.
pub fn points(route: &Route, max_gap: f64) -> RoutePoints<'_> {
    RoutePoints {
        steps: route.legs.iter().flatten(),
        step_index: 0,
        decoded: Vec::new().into_iter(),
        pending: None,
        previous: None,
        max_gap,
        finished: false,
    }
}

/// Drains [`points`] into a vector, stopping at the first decode error.
pub fn collect_points(route: &Route, max_gap: f64) -> Result<Vec<Coordinate>, DecodeError> {
    points(route, max_gap).collect()
}

/// Iterator returned by [`points`].
#[derive(Debug, Clone)]
pub struct RoutePoints<'a> {
    steps: Flatten<slice::Iter<'a, Leg>>,
    step_index: usize,
    decoded: std::vec::IntoIter<Coordinate>,
    pending: Option<GapFill>,
    previous: Option<Coordinate>,
    max_gap: f64,
    finished: bool,
}

/// Synthetic points still owed before `anchor` is emitted.
#[derive(Debug, Clone, Copy)]
struct GapFill {
    cursor: Coordinate,
    lat_step: f64,
    lng_step: f64,
    remaining: u64,
    anchor: Coordinate,
}

impl GapFill {
    fn between(from: Coordinate, to: Coordinate, max_gap: f64) -> Option<Self> {
        let dist = euclidean_distance(to, from);
        if !(dist > max_gap) {
            return None;
        }

        let steps = (dist / max_gap).ceil();
        if !steps.is_finite() {
            return None;
        }

        Some(Self {
            cursor: from,
            lat_step: (to.lat - from.lat) / steps,
            lng_step: (to.lng - from.lng) / steps,
            remaining: steps as u64,
            anchor: to,
        })
    }

    fn advance(&mut self) -> Option<Coordinate> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.cursor = Coordinate::new(self.cursor.lat + self.lat_step, self.cursor.lng + self.lng_step);
        Some(self.cursor)
    }
}

impl RoutePoints<'_> {
    fn gap_fill(&self, current: Coordinate) -> Option<GapFill> {
        if !(self.max_gap > 0.0) {
            return None;
        }
        let previous = self.previous?;
        let fill = GapFill::between(previous, current, self.max_gap)?;
        trace!(
            from = ?previous,
            to = ?current,
            inserted = fill.remaining,
            "interpolating gap"
        );
        Some(fill)
    }

    fn emit_anchor(&mut self, point: Coordinate) -> Option<Result<Coordinate, DecodeError>> {
        self.previous = Some(point);
        Some(Ok(point))
    }
}

impl Iterator for RoutePoints<'_> {
    type Item = Result<Coordinate, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            if let Some(fill) = self.pending.as_mut() {
                if let Some(point) = fill.advance() {
                    return Some(Ok(point));
                }
                let anchor = fill.anchor;
                self.pending = None;
                return self.emit_anchor(anchor);
            }

            if let Some(current) = self.decoded.next() {
                match self.gap_fill(current) {
                    Some(fill) => {
                        self.pending = Some(fill);
                        continue;
                    }
                    None => return self.emit_anchor(current),
                }
            }

            let Some(step) = self.steps.next() else {
                self.finished = true;
                return None;
            };
            let index = self.step_index;
            self.step_index += 1;

            match decode(step.polyline.as_str()) {
                Ok(decoded) => {
                    debug!(step = index, points = decoded.len(), "decoded step polyline");
                    self.decoded = decoded.into_iter();
                }
                Err(err) => {
                    debug!(step = index, error = %err, "step polyline failed to decode");
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl FusedIterator for RoutePoints<'_> {}
