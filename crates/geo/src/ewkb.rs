//! Hex-encoded extended-WKB point decoding.
//!
//! Some driver paths return the geography column as the raw hex form of an
//! EWKB record. Layout for a 2D point:
//!
//! ```text
//! byte 0        endianness flag (1 = little-endian, 0 = big-endian)
//! bytes 1..5    geometry type word; low 28 bits carry the type code,
//!               bit 0x20000000 marks a trailing SRID word
//! [bytes 5..9]  spatial reference id (only when flagged; skipped)
//! next 16 bytes longitude then latitude, IEEE-754 doubles
//! ```

use crate::{Coordinate, GeoError, Result};

/// WKB geometry type code for a point.
const WKB_POINT: u32 = 1;

/// Mask for the geometry type code within the type word.
const TYPE_MASK: u32 = 0x0FFF_FFFF;

/// Flag bit marking an embedded spatial reference id.
const SRID_FLAG: u32 = 0x2000_0000;

/// Parse a hex string as an EWKB point record.
///
/// The string must be even-length hex; anything else is rejected before
/// decoding so plain-text location values fall through cheaply.
pub(crate) fn parse_ewkb_hex(hex_str: &str) -> Result<Coordinate> {
    if hex_str.is_empty()
        || hex_str.len() % 2 != 0
        || !hex_str.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(GeoError::InvalidEwkb("Not an even-length hex string".into()));
    }

    let bytes = hex::decode(hex_str)
        .map_err(|e| GeoError::InvalidEwkb(format!("Hex decode failed: {e}")))?;
    decode_point(&bytes)
}

/// Decode an EWKB point from raw bytes.
fn decode_point(bytes: &[u8]) -> Result<Coordinate> {
    let little_endian = match bytes.first().copied() {
        Some(1) => true,
        Some(0) => false,
        Some(other) => {
            return Err(GeoError::InvalidEwkb(format!("Unknown endianness flag: {other}")));
        }
        None => return Err(GeoError::InvalidEwkb("Empty payload".into())),
    };

    let type_word = read_u32(bytes, 1, little_endian)
        .ok_or_else(|| GeoError::InvalidEwkb("Truncated type word".into()))?;

    if type_word & TYPE_MASK != WKB_POINT {
        return Err(GeoError::InvalidEwkb(format!(
            "Geometry type {} is not a point",
            type_word & TYPE_MASK
        )));
    }

    let mut offset = 5;
    if type_word & SRID_FLAG != 0 {
        // The spatial reference id is present but unused
        offset += 4;
    }

    let lng = read_f64(bytes, offset, little_endian)
        .ok_or_else(|| GeoError::InvalidEwkb("Truncated longitude".into()))?;
    let lat = read_f64(bytes, offset + 8, little_endian)
        .ok_or_else(|| GeoError::InvalidEwkb("Truncated latitude".into()))?;

    if !lng.is_finite() || !lat.is_finite() {
        return Err(GeoError::InvalidCoordinate(
            "Non-finite coordinate in EWKB payload".into(),
        ));
    }

    Ok(Coordinate::new(lat, lng))
}

fn read_u32(bytes: &[u8], offset: usize, little_endian: bool) -> Option<u32> {
    let chunk: [u8; 4] = bytes.get(offset..offset + 4)?.try_into().ok()?;
    Some(if little_endian {
        u32::from_le_bytes(chunk)
    } else {
        u32::from_be_bytes(chunk)
    })
}

fn read_f64(bytes: &[u8], offset: usize, little_endian: bool) -> Option<f64> {
    let chunk: [u8; 8] = bytes.get(offset..offset + 8)?.try_into().ok()?;
    Some(if little_endian {
        f64::from_le_bytes(chunk)
    } else {
        f64::from_be_bytes(chunk)
    })
}
