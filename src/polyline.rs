//! Encoded polyline codec for route geometries.
//!
//! Directions services ship each step's path as an encoded polyline: a
//! sequence of (lat, lng) deltas scaled by 1e5, zig-zag signed, split into
//! 5-bit groups with a continuation bit and offset by 63 into printable
//! ASCII. Decoding happens at the boundary, the rest of the crate works on
//! [`Coordinate`] values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Coordinate;

/// Scale between integer polyline units and degrees.
const PRECISION: f64 = 1e5;

/// Every chunk character is offset by this much into printable ASCII.
const CHUNK_OFFSET: u8 = 63;

/// Set on every chunk except the last one of a value.
const CONTINUATION_BIT: u8 = 0x20;

const CHUNK_MASK: u8 = 0x1f;

/// Largest shift accepted for a chunk; keeps the accumulated value within 60 bits.
const MAX_SHIFT: u32 = 55;

/// Failure to decode an encoded polyline. No partial output accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("polyline ends in the middle of a value at byte {position}")]
    Truncated { position: usize },

    #[error("invalid polyline character {character:?} at byte {position}")]
    InvalidCharacter { position: usize, character: char },

    #[error("polyline value starting before byte {position} does not fit in 64 bits")]
    Overflow { position: usize },
}

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string.
    pub fn decode(encoded: &str) -> Result<Self, DecodeError> {
        decode(encoded).map(Self::new)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Encodes the points back into the compact string form.
    pub fn encode(&self) -> String {
        encode(&self.points)
    }
}

/// Decodes an encoded polyline into absolute coordinates.
///
/// The whole string is consumed as back-to-back (lat, lng) value pairs; the
/// boundaries between values are implied by the continuation bits. An empty
/// string decodes to no points.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::with_capacity(bytes.len() / 4);

    while index < bytes.len() {
        let d_lat = next_value(bytes, &mut index)?;
        let d_lng = next_value(bytes, &mut index)?;

        lat = lat
            .checked_add(d_lat)
            .ok_or(DecodeError::Overflow { position: index })?;
        lng = lng
            .checked_add(d_lng)
            .ok_or(DecodeError::Overflow { position: index })?;

        points.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}

/// Reads one zig-zag encoded varint starting at `index`, advancing past it.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let position = *index;
        let byte = *bytes
            .get(position)
            .ok_or(DecodeError::Truncated { position })?;
        let chunk = match byte.checked_sub(CHUNK_OFFSET) {
            Some(chunk) if chunk <= 0x3f => chunk,
            _ => {
                return Err(DecodeError::InvalidCharacter {
                    position,
                    character: char::from(byte),
                });
            }
        };
        if shift > MAX_SHIFT {
            return Err(DecodeError::Overflow { position });
        }

        result |= u64::from(chunk & CHUNK_MASK) << shift;
        shift += 5;
        *index += 1;

        if chunk < CONTINUATION_BIT {
            break;
        }
    }

    let magnitude = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !magnitude } else { magnitude })
}

/// Encodes coordinates into a polyline string, rounding to 1e-5 degrees.
pub fn encode(points: &[Coordinate]) -> String {
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.lat * PRECISION).round() as i64;
        let lng = (point.lng * PRECISION).round() as i64;
        push_value(&mut encoded, lat - prev_lat);
        push_value(&mut encoded, lng - prev_lng);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

fn push_value(out: &mut String, value: i64) {
    let mut zigzag = ((value << 1) ^ (value >> 63)) as u64;
    while zigzag >= u64::from(CONTINUATION_BIT) {
        let chunk = (zigzag as u8 & CHUNK_MASK) | CONTINUATION_BIT;
        out.push(char::from(chunk + CHUNK_OFFSET));
        zigzag >>= 5;
    }
    out.push(char::from(zigzag as u8 + CHUNK_OFFSET));
}
