//! Native vertex-walk writer (Strategy A, §4.4.1).

use geo_types::{Geometry, LineString, Point, Polygon};
use log::trace;

use crate::adapter::{self, empty_point};
use crate::cursor::ByteWriter;
use crate::envelope::Envelope;
use crate::error::{GeoBlobError, Result};
use crate::tag::GeometryTag;

/// Starting reservation for a fresh output buffer; grows geometrically from here via
/// `Vec`'s own growth policy (§5, §12).
pub const INITIAL_BUFFER_CAPACITY: usize = 100;

/// Serialize a geometry to a fresh owned buffer.
pub fn serialize(geom: &Geometry<f64>) -> Result<Vec<u8>> {
    let tag = adapter::classify(geom)?;
    trace!("serialize: resolved tag {tag:?}");
    let mut w = ByteWriter::with_capacity(INITIAL_BUFFER_CAPACITY);
    w.write_byte(tag.code())?;
    if tag.has_envelope_prefix() {
        write_bounds(&mut w, &adapter::envelope_of(geom))?;
    }
    write_body(&mut w, tag, geom)?;
    Ok(w.into_vec())
}

/// Serialize a top-level envelope. Refuses the empty envelope (fatal per §4.4.1).
pub fn serialize_envelope(env: &Envelope) -> Result<Vec<u8>> {
    if env.is_empty() {
        return Err(GeoBlobError::Internal(
            "refusing to serialize an empty envelope as a top-level value".to_string(),
        ));
    }
    trace!("serialize_envelope: resolved tag {:?}", GeometryTag::Envelope);
    let mut w = ByteWriter::with_capacity(33);
    w.write_byte(GeometryTag::Envelope.code())?;
    write_bounds(&mut w, env)?;
    Ok(w.into_vec())
}

fn write_bounds(w: &mut ByteWriter, env: &Envelope) -> Result<()> {
    if env.is_empty() {
        for _ in 0..4 {
            w.write_f64_le(f64::NAN)?;
        }
    } else {
        w.write_f64_le(env.x_min())?;
        w.write_f64_le(env.y_min())?;
        w.write_f64_le(env.x_max())?;
        w.write_f64_le(env.y_max())?;
    }
    Ok(())
}

fn write_point_coords(w: &mut ByteWriter, pt: &Point<f64>) -> Result<()> {
    w.write_f64_le(pt.x())?;
    w.write_f64_le(pt.y())?;
    Ok(())
}

fn write_coord_seq(w: &mut ByteWriter, coords: impl ExactSizeIterator<Item = (f64, f64)>) -> Result<()> {
    w.write_i32_le(coords.len() as i32)?;
    for (x, y) in coords {
        w.write_f64_le(x)?;
        w.write_f64_le(y)?;
    }
    Ok(())
}

fn write_line_string_body(w: &mut ByteWriter, ls: &LineString<f64>) -> Result<()> {
    write_coord_seq(w, ls.0.iter().map(|c| (c.x, c.y)))
}

fn write_polygon_body(w: &mut ByteWriter, poly: &Polygon<f64>) -> Result<()> {
    write_line_string_body(w, poly.exterior())?;
    w.write_i32_le(poly.interiors().len() as i32)?;
    for ring in poly.interiors() {
        write_line_string_body(w, ring)?;
    }
    Ok(())
}

/// Write BODY (§4.4: COORDSEQ / RING_BODY / etc.) for the given tag. Used both for
/// top-level records (after the tag and optional BOUNDS) and for collection entries
/// (after the tag, with no BOUNDS at all — §4.4.1's GeometryCollection rule).
fn write_body(w: &mut ByteWriter, tag: GeometryTag, geom: &Geometry<f64>) -> Result<()> {
    match (tag, geom) {
        (GeometryTag::Point, Geometry::Point(pt)) => write_point_coords(w, pt),
        (GeometryTag::MultiPoint, Geometry::MultiPoint(mp)) => {
            write_coord_seq(w, mp.0.iter().map(|p| (p.x(), p.y())))
        }
        (GeometryTag::LineString, Geometry::LineString(ls)) => write_line_string_body(w, ls),
        (GeometryTag::MultiLineString, Geometry::MultiLineString(mls)) => {
            w.write_i32_le(mls.0.len() as i32)?;
            for ls in &mls.0 {
                write_line_string_body(w, ls)?;
            }
            Ok(())
        }
        (GeometryTag::Polygon, Geometry::Polygon(poly)) => write_polygon_body(w, poly),
        (GeometryTag::MultiPolygon, Geometry::MultiPolygon(mpoly)) => {
            w.write_i32_le(mpoly.0.len() as i32)?;
            for poly in &mpoly.0 {
                write_polygon_body(w, poly)?;
            }
            Ok(())
        }
        (GeometryTag::GeometryCollection, Geometry::GeometryCollection(gc)) => {
            w.write_i32_le(gc.0.len() as i32)?;
            for child in &gc.0 {
                write_collection_entry(w, child)?;
            }
            Ok(())
        }
        _ => Err(GeoBlobError::Internal(format!(
            "writer classified geometry as {tag:?} but body does not match that variant"
        ))),
    }
}

fn write_collection_entry(w: &mut ByteWriter, child: &Geometry<f64>) -> Result<()> {
    let child_tag = adapter::classify(child)?;
    let start = w.size();
    let placeholder = w.reserve_i32_le()?;
    w.write_byte(child_tag.code())?;
    write_body(w, child_tag, child)?;
    let entry_len = (w.size() - start - 4) as i32;
    w.patch_i32_le_at(placeholder, entry_len)
}

/// The empty point, written as the degenerate `POINT` record `(NaN, NaN)` — exposed
/// separately since callers building fixtures by hand often want this without routing
/// through `geo_types::Geometry` construction first.
pub fn serialize_empty_point() -> Result<Vec<u8>> {
    serialize(&Geometry::Point(empty_point()))
}
