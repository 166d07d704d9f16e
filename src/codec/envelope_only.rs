//! Envelope-only decode (§4.4.3): the fast path that justifies the whole format. Reads
//! the tag and the 32-byte BOUNDS block (or, for `POINT`/`ENVELOPE`, the handful of
//! bytes that stand in for it) and returns without ever looking at the body.
//!
//! Grounded in the same manual little-endian slice indexing a lazy WKB header parser
//! uses to classify a record without materializing its geometry — no `scroll` cursor
//! is needed here since there is nothing sequential to walk past the first 33 bytes.

use crate::envelope::Envelope;
use crate::error::{GeoBlobError, Result};
use crate::tag::GeometryTag;

const POINT_RECORD_LEN: usize = 1 + 8 + 8;
const BOUNDS_LEN: usize = 32;

/// Recover only the bounding envelope of a serialized value, without materializing
/// vertices. Cost is O(1) in the number of vertices: at most 33 bytes are read,
/// regardless of how large `bytes` is.
pub fn deserialize_envelope(bytes: &[u8]) -> Result<Envelope> {
    let tag_byte = *bytes
        .first()
        .ok_or_else(|| GeoBlobError::UnexpectedEof { offset: 0, needed: 1 })?;
    let tag = GeometryTag::from_code(tag_byte)?;

    match tag {
        GeometryTag::Point => {
            require(bytes, POINT_RECORD_LEN)?;
            let x = read_f64(bytes, 1);
            let y = read_f64(bytes, 9);
            Ok(Envelope::of_point(x, y))
        }
        GeometryTag::Envelope => {
            require(bytes, 1 + BOUNDS_LEN)?;
            Ok(bounds_at(bytes, 1))
        }
        _ => {
            require(bytes, 1 + BOUNDS_LEN)?;
            Ok(bounds_at(bytes, 1))
        }
    }
}

/// `getGeometryType` / P6: the outermost variant, from the tag byte alone.
pub fn geometry_type(bytes: &[u8]) -> Result<GeometryTag> {
    let tag_byte = *bytes
        .first()
        .ok_or_else(|| GeoBlobError::UnexpectedEof { offset: 0, needed: 1 })?;
    GeometryTag::from_code(tag_byte)
}

fn require(bytes: &[u8], n: usize) -> Result<()> {
    if bytes.len() < n {
        return Err(GeoBlobError::UnexpectedEof {
            offset: bytes.len(),
            needed: n - bytes.len(),
        });
    }
    Ok(())
}

fn read_f64(bytes: &[u8], at: usize) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    f64::from_le_bytes(buf)
}

fn bounds_at(bytes: &[u8], at: usize) -> Envelope {
    let x_min = read_f64(bytes, at);
    let y_min = read_f64(bytes, at + 8);
    let x_max = read_f64(bytes, at + 16);
    let y_max = read_f64(bytes, at + 24);
    if x_min.is_nan() || y_min.is_nan() || x_max.is_nan() || y_max.is_nan() {
        Envelope::empty()
    } else {
        Envelope::new(x_min, y_min, x_max, y_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::writer;
    use geo_types::{Coord, Geometry, LineString, MultiPolygon, Point, Polygon};

    #[test]
    fn point_envelope_is_degenerate() {
        let buf = writer::serialize(&Geometry::Point(Point::new(1.0, 2.0))).unwrap();
        assert_eq!(
            deserialize_envelope(&buf).unwrap(),
            Envelope::new(1.0, 2.0, 1.0, 2.0)
        );
    }

    #[test]
    fn empty_point_envelope_is_empty() {
        let buf = writer::serialize_empty_point().unwrap();
        assert!(deserialize_envelope(&buf).unwrap().is_empty());
    }

    #[test]
    fn envelope_record_returns_stored_bounds() {
        let env = Envelope::new(0.0, 0.0, 5.0, 5.0);
        let buf = writer::serialize_envelope(&env).unwrap();
        assert_eq!(deserialize_envelope(&buf).unwrap(), env);
    }

    #[test]
    fn cost_is_independent_of_vertex_count() {
        let ring = LineString(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 0.0, y: 0.0 },
        ]);
        let small = MultiPolygon(vec![Polygon::new(ring.clone(), vec![])]);
        let small_buf = writer::serialize(&Geometry::MultiPolygon(small)).unwrap();

        let many_rings: Vec<Polygon<f64>> = (0..2000)
            .map(|_| Polygon::new(ring.clone(), vec![]))
            .collect();
        let large = MultiPolygon(many_rings);
        let large_buf = writer::serialize(&Geometry::MultiPolygon(large)).unwrap();

        assert!(large_buf.len() > small_buf.len() * 100);
        assert_eq!(
            deserialize_envelope(&small_buf).unwrap(),
            deserialize_envelope(&large_buf).unwrap()
        );
    }

    #[test]
    fn geometry_type_reads_outermost_variant() {
        let buf = writer::serialize_empty_point().unwrap();
        assert_eq!(geometry_type(&buf).unwrap(), GeometryTag::Point);
    }
}
