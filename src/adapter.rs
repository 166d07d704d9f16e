//! Thin adapter over `geo_types::Geometry<f64>`: the fixed capability surface the codec
//! needs from a geometry object model (classification, envelope computation, vertex
//! access) without pulling in a full algorithms crate.

use geo_types::{Coord, Geometry, LineString, Point, Polygon};

use crate::envelope::Envelope;
use crate::error::{GeoBlobError, Result};
use crate::tag::GeometryTag;

/// Classify a geometry into one of the eight wire variants.
///
/// `geo_types::Geometry` also defines `Rect`, `Line`, and `Triangle`, which are outside
/// the closed set this format's *record* grammar represents — `ENVELOPE` is a distinct
/// top-level record kind written via [`crate::codec::serialize_envelope`], not a
/// `Geometry` variant this adapter will classify on the caller's behalf. Encountering
/// any of the three is an adapter-classification failure, not a format error, since it
/// means the caller handed us something the wire grammar was never meant to carry
/// through this entry point.
pub fn classify(geom: &Geometry<f64>) -> Result<GeometryTag> {
    match geom {
        Geometry::Point(_) => Ok(GeometryTag::Point),
        Geometry::MultiPoint(_) => Ok(GeometryTag::MultiPoint),
        Geometry::LineString(_) => Ok(GeometryTag::LineString),
        Geometry::MultiLineString(_) => Ok(GeometryTag::MultiLineString),
        Geometry::Polygon(_) => Ok(GeometryTag::Polygon),
        Geometry::MultiPolygon(_) => Ok(GeometryTag::MultiPolygon),
        Geometry::GeometryCollection(_) => Ok(GeometryTag::GeometryCollection),
        Geometry::Rect(_) => Err(GeoBlobError::Internal(
            "Geometry::Rect has no Geometry-side wire record; call serialize_envelope \
             with its envelope instead"
                .to_string(),
        )),
        Geometry::Line(_) | Geometry::Triangle(_) => Err(GeoBlobError::Internal(
            "geometry variant outside the closed eight-shape wire grammar".to_string(),
        )),
    }
}

/// Whether a point is the empty-point singleton: either coordinate `NaN`.
pub fn is_empty_point(pt: &Point<f64>) -> bool {
    pt.x().is_nan() || pt.y().is_nan()
}

/// The empty point, represented the same way the format does: `(NaN, NaN)`.
pub fn empty_point() -> Point<f64> {
    Point::new(f64::NAN, f64::NAN)
}

/// Compute the envelope of a geometry by walking its vertices directly.
///
/// Deliberately not delegated to `geo::BoundingRect` — a single min/max reduction does
/// not justify depending on the full `geo` algorithms crate.
pub fn envelope_of(geom: &Geometry<f64>) -> Envelope {
    let mut env = Envelope::empty();
    accumulate_envelope(geom, &mut env);
    env
}

fn accumulate_envelope(geom: &Geometry<f64>, env: &mut Envelope) {
    match geom {
        Geometry::Point(pt) => {
            if !is_empty_point(pt) {
                env.extend(&Envelope::of_point(pt.x(), pt.y()));
            }
        }
        Geometry::MultiPoint(mp) => {
            for pt in &mp.0 {
                if !is_empty_point(pt) {
                    env.extend(&Envelope::of_point(pt.x(), pt.y()));
                }
            }
        }
        Geometry::LineString(ls) => extend_with_line_string(env, ls),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                extend_with_line_string(env, ls);
            }
        }
        Geometry::Polygon(poly) => extend_with_polygon(env, poly),
        Geometry::MultiPolygon(mpoly) => {
            for poly in &mpoly.0 {
                extend_with_polygon(env, poly);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                accumulate_envelope(child, env);
            }
        }
        Geometry::Rect(rect) => {
            env.extend(&Envelope::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y));
        }
        Geometry::Line(_) | Geometry::Triangle(_) => {}
    }
}

fn extend_with_line_string(env: &mut Envelope, ls: &LineString<f64>) {
    for coord in &ls.0 {
        env.extend(&Envelope::of_point(coord.x, coord.y));
    }
}

fn extend_with_polygon(env: &mut Envelope, poly: &Polygon<f64>) {
    extend_with_line_string(env, poly.exterior());
    for ring in poly.interiors() {
        extend_with_line_string(env, ring);
    }
}

/// Build the five-vertex closed rectangle ring used to synthesize a polygon from an
/// ENVELOPE record on full decode (§4.4.2 step 4). An empty envelope yields an empty
/// polygon (zero rings).
pub fn polygon_of_envelope(env: &Envelope) -> Polygon<f64> {
    if env.is_empty() {
        return Polygon::new(LineString(vec![]), vec![]);
    }
    let ring = LineString(vec![
        Coord { x: env.x_min(), y: env.y_min() },
        Coord { x: env.x_max(), y: env.y_min() },
        Coord { x: env.x_max(), y: env.y_max() },
        Coord { x: env.x_min(), y: env.y_max() },
        Coord { x: env.x_min(), y: env.y_min() },
    ]);
    Polygon::new(ring, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, MultiPoint, Polygon, Rect};

    #[test]
    fn classifies_each_closed_set_variant() {
        assert_eq!(
            classify(&Geometry::Point(Point::new(1.0, 2.0))).unwrap(),
            GeometryTag::Point
        );
        assert_eq!(
            classify(&Geometry::MultiPoint(MultiPoint(vec![]))).unwrap(),
            GeometryTag::MultiPoint
        );
    }

    #[test]
    fn rect_is_rejected_not_misrouted_to_envelope() {
        let rect = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        assert!(matches!(
            classify(&Geometry::Rect(rect)),
            Err(GeoBlobError::Internal(_))
        ));
    }

    #[test]
    fn empty_point_detected_by_nan() {
        assert!(is_empty_point(&empty_point()));
        assert!(!is_empty_point(&Point::new(1.0, 2.0)));
    }

    #[test]
    fn envelope_of_point_is_degenerate() {
        let env = envelope_of(&Geometry::Point(Point::new(3.0, 4.0)));
        assert_eq!(env, Envelope::new(3.0, 4.0, 3.0, 4.0));
    }

    #[test]
    fn envelope_of_empty_point_is_empty() {
        let env = envelope_of(&Geometry::Point(empty_point()));
        assert!(env.is_empty());
    }

    #[test]
    fn envelope_of_polygon_covers_all_rings() {
        let exterior = LineString(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 10.0 },
            Coord { x: 10.0, y: 10.0 },
            Coord { x: 10.0, y: 0.0 },
            Coord { x: 0.0, y: 0.0 },
        ]);
        let poly = Polygon::new(exterior, vec![]);
        let env = envelope_of(&Geometry::Polygon(poly));
        assert_eq!(env, Envelope::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn polygon_of_envelope_is_closed_rectangle() {
        let env = Envelope::new(0.0, 0.0, 10.0, 10.0);
        let poly = polygon_of_envelope(&env);
        assert_eq!(poly.exterior().0.len(), 5);
        assert_eq!(poly.exterior().0[0], poly.exterior().0[4]);
    }

    #[test]
    fn polygon_of_empty_envelope_has_no_rings() {
        let poly = polygon_of_envelope(&Envelope::empty());
        assert_eq!(poly.exterior().0.len(), 0);
        assert_eq!(poly.interiors().len(), 0);
    }
}
