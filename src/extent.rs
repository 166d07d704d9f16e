//! Extent aggregator (§4.5): a commutative, associative reduction over serialized
//! values, driven exclusively by the envelope-only fast path.

use log::warn;

use crate::codec::{envelope_only, serialize_envelope};
use crate::envelope::Envelope;
use crate::error::Result;

/// Running `ST_Extent` state. Initialized to the all-infinite identity element so that
/// `merge`/`accumulate` compose associatively without a special-cased "first value".
#[derive(Debug, Clone, Copy)]
pub struct ExtentAggregator {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl ExtentAggregator {
    pub fn new() -> Self {
        ExtentAggregator {
            x_min: f64::INFINITY,
            y_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    /// Fold one serialized value's envelope into the running state. A no-op if the
    /// value's envelope is empty.
    pub fn accumulate(&mut self, bytes: &[u8]) -> Result<()> {
        let env = envelope_only::deserialize_envelope(bytes)?;
        if env.is_empty() {
            return Ok(());
        }
        self.x_min = self.x_min.min(env.x_min());
        self.y_min = self.y_min.min(env.y_min());
        self.x_max = self.x_max.max(env.x_max());
        self.y_max = self.y_max.max(env.y_max());
        Ok(())
    }

    /// Componentwise min/max of two aggregator states. Commutative and associative.
    pub fn merge(&mut self, other: &ExtentAggregator) {
        self.x_min = self.x_min.min(other.x_min);
        self.y_min = self.y_min.min(other.y_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_max = self.y_max.max(other.y_max);
    }

    fn is_identity(&self) -> bool {
        self.x_min.is_infinite()
            || self.y_min.is_infinite()
            || self.x_max.is_infinite()
            || self.y_max.is_infinite()
    }

    /// `None` (SQL NULL / empty geometry) if every accumulated input was empty;
    /// otherwise a serialized `ENVELOPE` record.
    pub fn finalize(&self) -> Result<Option<Vec<u8>>> {
        if self.is_identity() {
            warn!("extent aggregator finalized with no non-empty inputs");
            return Ok(None);
        }
        let env = Envelope::new(self.x_min, self.y_min, self.x_max, self.y_max);
        Ok(Some(serialize_envelope(&env)?))
    }
}

impl Default for ExtentAggregator {
    fn default() -> Self {
        ExtentAggregator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::writer;
    use geo_types::{Geometry, MultiPoint, Point};

    fn point_bytes(x: f64, y: f64) -> Vec<u8> {
        writer::serialize(&Geometry::Point(Point::new(x, y))).unwrap()
    }

    #[test]
    fn finalize_with_no_inputs_is_none() {
        let agg = ExtentAggregator::new();
        assert!(agg.finalize().unwrap().is_none());
    }

    #[test]
    fn accumulate_empty_point_is_noop() {
        let mut agg = ExtentAggregator::new();
        agg.accumulate(&writer::serialize_empty_point().unwrap()).unwrap();
        assert!(agg.finalize().unwrap().is_none());
    }

    #[test]
    fn accumulate_widens_bounds() {
        let mut agg = ExtentAggregator::new();
        agg.accumulate(&point_bytes(1.0, 1.0)).unwrap();
        agg.accumulate(&point_bytes(10.0, 10.0)).unwrap();
        let out = agg.finalize().unwrap().unwrap();
        assert_eq!(
            envelope_only::deserialize_envelope(&out).unwrap(),
            Envelope::new(1.0, 1.0, 10.0, 10.0)
        );
    }

    #[test]
    fn is_commutative_under_permutation() {
        let inputs = [point_bytes(1.0, 1.0), point_bytes(5.0, -2.0), point_bytes(-3.0, 8.0)];

        let mut forward = ExtentAggregator::new();
        for b in &inputs {
            forward.accumulate(b).unwrap();
        }

        let mut backward = ExtentAggregator::new();
        for b in inputs.iter().rev() {
            backward.accumulate(b).unwrap();
        }

        assert_eq!(
            forward.finalize().unwrap().unwrap(),
            backward.finalize().unwrap().unwrap()
        );
    }

    #[test]
    fn is_associative_under_merge() {
        let a = point_bytes(0.0, 0.0);
        let b = point_bytes(2.0, 2.0);
        let c = point_bytes(-1.0, 5.0);

        let mut left = ExtentAggregator::new();
        left.accumulate(&a).unwrap();
        let mut ab = ExtentAggregator::new();
        ab.accumulate(&b).unwrap();
        left.merge(&ab);
        let mut c_agg = ExtentAggregator::new();
        c_agg.accumulate(&c).unwrap();
        left.merge(&c_agg);

        let mut right = ExtentAggregator::new();
        right.accumulate(&a).unwrap();
        let mut bc = ExtentAggregator::new();
        bc.accumulate(&b).unwrap();
        let mut c_agg2 = ExtentAggregator::new();
        c_agg2.accumulate(&c).unwrap();
        bc.merge(&c_agg2);
        right.merge(&bc);

        assert_eq!(
            left.finalize().unwrap().unwrap(),
            right.finalize().unwrap().unwrap()
        );
    }

    #[test]
    fn matches_seed_scenario_table() {
        // Scenario 1: POINT (1 2); scenario 4: MULTIPOINT (1 1, 2 2); scenario 5:
        // GEOMETRYCOLLECTION (POINT EMPTY, POINT (3 4)); plus scenario 3: LINESTRING
        // (0 0, 10 0, 10 10). Expected union: (1,1,10,10).
        let scenario1 = point_bytes(1.0, 2.0);
        let scenario4 = writer::serialize(&Geometry::MultiPoint(MultiPoint(vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ])))
        .unwrap();
        let scenario5 = writer::serialize(&Geometry::GeometryCollection(
            geo_types::GeometryCollection(vec![
                Geometry::Point(crate::adapter::empty_point()),
                Geometry::Point(Point::new(3.0, 4.0)),
            ]),
        ))
        .unwrap();
        let scenario3 = writer::serialize(&Geometry::LineString(geo_types::LineString(vec![
            geo_types::Coord { x: 0.0, y: 0.0 },
            geo_types::Coord { x: 10.0, y: 0.0 },
            geo_types::Coord { x: 10.0, y: 10.0 },
        ])))
        .unwrap();

        let mut agg = ExtentAggregator::new();
        for b in [&scenario1, &scenario4, &scenario5, &scenario3] {
            agg.accumulate(b).unwrap();
        }
        let out = agg.finalize().unwrap().unwrap();
        assert_eq!(
            envelope_only::deserialize_envelope(&out).unwrap(),
            Envelope::new(1.0, 1.0, 10.0, 10.0)
        );
    }
}
