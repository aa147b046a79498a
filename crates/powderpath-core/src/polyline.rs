//! Decoder for the compact encoded-polyline format (precision 5) returned by
//! the pedestrian routing service.

use crate::models::LatLng;
use thiserror::Error;

const PRECISION: f64 = 1e5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },

    #[error("polyline ends mid-value at offset {0}")]
    Truncated(usize),

    #[error("polyline value too long at offset {0}")]
    Overflow(usize),
}

fn next_value(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0u32;
    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(PolylineError::Truncated(*offset));
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidByte { byte, offset: *offset });
        }
        if shift > 30 {
            return Err(PolylineError::Overflow(*offset));
        }
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *offset += 1;
        if chunk < 0x20 {
            break;
        }
    }
    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Decode an encoded polyline into `(lat, lng)` points.
pub fn decode_polyline(encoded: &str) -> Result<Vec<LatLng>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut offset = 0usize;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while offset < bytes.len() {
        lat += next_value(bytes, &mut offset)?;
        lng += next_value(bytes, &mut offset)?;
        points.push(LatLng::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}
