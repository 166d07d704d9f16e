//! The closed, eight-value set of wire type discriminators.

use crate::error::{GeoBlobError, Result};

/// First byte of every serialized record.
///
/// Numbering is part of the wire contract: once assigned, a code must never be reused
/// for a different variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GeometryTag {
    Point = 0,
    MultiPoint = 1,
    LineString = 2,
    MultiLineString = 3,
    Polygon = 4,
    MultiPolygon = 5,
    GeometryCollection = 6,
    Envelope = 7,
}

impl GeometryTag {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(GeometryTag::Point),
            1 => Ok(GeometryTag::MultiPoint),
            2 => Ok(GeometryTag::LineString),
            3 => Ok(GeometryTag::MultiLineString),
            4 => Ok(GeometryTag::Polygon),
            5 => Ok(GeometryTag::MultiPolygon),
            6 => Ok(GeometryTag::GeometryCollection),
            7 => Ok(GeometryTag::Envelope),
            other => Err(GeoBlobError::UnknownTag(other)),
        }
    }

    /// Every tag other than `Point` and `Envelope` carries a 32-byte BOUNDS block
    /// immediately after the tag byte.
    pub fn has_envelope_prefix(self) -> bool {
        !matches!(self, GeometryTag::Point | GeometryTag::Envelope)
    }
}
