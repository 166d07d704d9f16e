//! Full deserialize (§4.4.2): reverses the native vertex walk and reconstructs an
//! owned `geo_types::Geometry<f64>`.

use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use log::trace;

use crate::adapter;
use crate::cursor::ByteReader;
use crate::envelope::Envelope;
use crate::error::{GeoBlobError, Result};
use crate::tag::GeometryTag;

/// Deserialize a full geometry from a serialized record.
pub fn deserialize(bytes: &[u8]) -> Result<Geometry<f64>> {
    let mut r = ByteReader::new(bytes);
    let tag = GeometryTag::from_code(r.read_byte()?)?;
    trace!("deserialize: resolved tag {tag:?}");

    if tag == GeometryTag::Envelope {
        let env = read_bounds(&mut r)?;
        return Ok(Geometry::Polygon(adapter::polygon_of_envelope(&env)));
    }

    if tag.has_envelope_prefix() {
        // Full decode recomputes bounds from the body rather than trusting the
        // redundant prefix; still validate it for internal consistency (§7).
        let _ = read_bounds(&mut r)?;
    }

    read_body(&mut r, tag)
}

fn read_bounds(r: &mut ByteReader) -> Result<Envelope> {
    let x_min = r.read_f64_le()?;
    let y_min = r.read_f64_le()?;
    let x_max = r.read_f64_le()?;
    let y_max = r.read_f64_le()?;
    let nan_count = [x_min, y_min, x_max, y_max]
        .iter()
        .filter(|v| v.is_nan())
        .count();
    if nan_count != 0 && nan_count != 4 {
        return Err(GeoBlobError::Internal(
            "envelope prefix has a mix of NaN and finite components".to_string(),
        ));
    }
    if nan_count == 4 {
        Ok(Envelope::empty())
    } else {
        Ok(Envelope::new(x_min, y_min, x_max, y_max))
    }
}

fn read_point_coords(r: &mut ByteReader) -> Result<Point<f64>> {
    let x = r.read_f64_le()?;
    let y = r.read_f64_le()?;
    Ok(Point::new(x, y))
}

fn read_coord_seq(r: &mut ByteReader) -> Result<Vec<Coord<f64>>> {
    let n = r.read_i32_le()?;
    if n < 0 {
        return Err(GeoBlobError::Internal("negative coordinate count".to_string()));
    }
    let mut coords = Vec::with_capacity(n as usize);
    for _ in 0..n {
        let x = r.read_f64_le()?;
        let y = r.read_f64_le()?;
        coords.push(Coord { x, y });
    }
    Ok(coords)
}

fn read_line_string_body(r: &mut ByteReader) -> Result<LineString<f64>> {
    Ok(LineString(read_coord_seq(r)?))
}

fn read_polygon_body(r: &mut ByteReader) -> Result<Polygon<f64>> {
    let exterior = read_line_string_body(r)?;
    let n_interior = r.read_i32_le()?;
    if n_interior < 0 {
        return Err(GeoBlobError::Internal("negative interior ring count".to_string()));
    }
    let mut interiors = Vec::with_capacity(n_interior as usize);
    for _ in 0..n_interior {
        interiors.push(read_line_string_body(r)?);
    }
    Ok(Polygon::new(exterior, interiors))
}

/// Read BODY for the given tag (§4.4: reverse of `writer::write_body`). Used for both
/// top-level records and collection entries, neither of which has already-consumed
/// envelope bytes left to skip at this point.
fn read_body(r: &mut ByteReader, tag: GeometryTag) -> Result<Geometry<f64>> {
    match tag {
        GeometryTag::Point => {
            let pt = read_point_coords(r)?;
            Ok(Geometry::Point(pt))
        }
        GeometryTag::MultiPoint => {
            let coords = read_coord_seq(r)?;
            Ok(Geometry::MultiPoint(MultiPoint(
                coords.into_iter().map(Point::from).collect(),
            )))
        }
        GeometryTag::LineString => Ok(Geometry::LineString(read_line_string_body(r)?)),
        GeometryTag::MultiLineString => {
            let n = r.read_i32_le()?;
            if n < 0 {
                return Err(GeoBlobError::Internal("negative line count".to_string()));
            }
            let mut lines = Vec::with_capacity(n as usize);
            for _ in 0..n {
                lines.push(read_line_string_body(r)?);
            }
            Ok(Geometry::MultiLineString(MultiLineString(lines)))
        }
        GeometryTag::Polygon => Ok(Geometry::Polygon(read_polygon_body(r)?)),
        GeometryTag::MultiPolygon => {
            let n = r.read_i32_le()?;
            if n < 0 {
                return Err(GeoBlobError::Internal("negative polygon count".to_string()));
            }
            let mut polys = Vec::with_capacity(n as usize);
            for _ in 0..n {
                polys.push(read_polygon_body(r)?);
            }
            Ok(Geometry::MultiPolygon(MultiPolygon(polys)))
        }
        GeometryTag::GeometryCollection => {
            let n = r.read_i32_le()?;
            if n < 0 {
                return Err(GeoBlobError::Internal("negative entry count".to_string()));
            }
            let mut children = Vec::with_capacity(n as usize);
            for _ in 0..n {
                children.push(read_collection_entry(r)?);
            }
            Ok(Geometry::GeometryCollection(GeometryCollection(
                children,
            )))
        }
        GeometryTag::Envelope => Err(GeoBlobError::Internal(
            "ENVELOPE is not a valid collection entry or nested body tag".to_string(),
        )),
    }
}

fn read_collection_entry(r: &mut ByteReader) -> Result<Geometry<f64>> {
    let entry_len = r.read_i32_le()?;
    if entry_len < 1 {
        return Err(GeoBlobError::Internal(
            "collection entry length must cover at least the inner tag byte".to_string(),
        ));
    }
    let start = r.position();
    let inner_tag = GeometryTag::from_code(r.read_byte()?)?;
    let geom = read_body(r, inner_tag)?;
    let consumed = r.position() - start;
    if consumed != entry_len as usize {
        return Err(GeoBlobError::Internal(format!(
            "collection entry declared length {entry_len} but body consumed {consumed} bytes"
        )));
    }
    Ok(geom)
}
