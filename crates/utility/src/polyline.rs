//! Compact polyline codec as used by OSRM and other routing services:
//! delta-encoded coordinates at precision 1e5, each delta written as
//! zigzag-signed 5-bit chunks with continuation bit 0x20, offset by 63
//! into printable ASCII.

use std::error;
use std::fmt;

const PRECISION: f64 = 1e5;
const CONTINUATION_BIT: u64 = 0x20;
const CHUNK_MASK: u64 = 0x1f;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A byte outside the printable encoding range appeared in the input.
    InvalidCharacter { position: usize, byte: u8 },
    /// The input ended inside a chunk sequence, i.e. the last chunk still
    /// had its continuation bit set or a longitude delta is missing.
    UnexpectedEnd,
    /// A chunk sequence ran past the 64 bits a delta can hold.
    DeltaTooLong { position: usize },
}

impl error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::InvalidCharacter { position, byte } => {
                write!(f, "invalid byte {byte:#04x} at position {position}")
            }
            DecodeError::UnexpectedEnd => {
                write!(f, "input ended inside a coordinate delta")
            }
            DecodeError::DeltaTooLong { position } => {
                write!(f, "coordinate delta ending at position {position} exceeds 64 bits")
            }
        }
    }
}

/// Decodes a polyline string into `(latitude, longitude)` pairs.
///
/// The empty string decodes to an empty sequence. Malformed input is an
/// error; no partially decoded prefix is returned.
pub fn decode(encoded: &str) -> Result<Vec<(f64, f64)>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut coordinates = Vec::new();
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;
    let mut cursor = 0;

    while cursor < bytes.len() {
        let (latitude_delta, next) = read_delta(bytes, cursor)?;
        let (longitude_delta, next) = read_delta(bytes, next)?;
        latitude += latitude_delta;
        longitude += longitude_delta;
        coordinates
            .push((latitude as f64 / PRECISION, longitude as f64 / PRECISION));
        cursor = next;
    }

    Ok(coordinates)
}

/// Encodes `(latitude, longitude)` pairs into a polyline string. Exact
/// inverse of [`decode`] for coordinates rounded to five decimal places.
pub fn encode(coordinates: &[(f64, f64)]) -> String {
    let mut encoded = String::new();
    let mut previous_latitude: i64 = 0;
    let mut previous_longitude: i64 = 0;

    for &(latitude, longitude) in coordinates {
        let latitude = (latitude * PRECISION).round() as i64;
        let longitude = (longitude * PRECISION).round() as i64;
        write_delta(latitude - previous_latitude, &mut encoded);
        write_delta(longitude - previous_longitude, &mut encoded);
        previous_latitude = latitude;
        previous_longitude = longitude;
    }

    encoded
}

fn read_delta(bytes: &[u8], start: usize) -> Result<(i64, usize), DecodeError> {
    let mut accumulator: u64 = 0;
    let mut shift = 0;
    let mut position = start;

    loop {
        let byte =
            *bytes.get(position).ok_or(DecodeError::UnexpectedEnd)?;
        if !(63..=127).contains(&byte) {
            return Err(DecodeError::InvalidCharacter { position, byte });
        }
        let chunk = (byte - 63) as u64;
        if shift >= u64::BITS {
            return Err(DecodeError::DeltaTooLong { position });
        }
        accumulator |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        position += 1;
        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    // zigzag: the sign lives in the lowest bit.
    let value = accumulator as i64;
    Ok(((value >> 1) ^ -(value & 1), position))
}

fn write_delta(delta: i64, encoded: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    loop {
        let mut chunk = value & CHUNK_MASK;
        value >>= 5;
        if value > 0 {
            chunk |= CONTINUATION_BIT;
        }
        encoded.push((chunk as u8 + 63) as char);
        if value == 0 {
            break;
        }
    }
}
