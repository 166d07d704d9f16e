//! Compact binary serialization of 2-D geometries, tuned for the hot path of a
//! columnar analytic store: every record carries a redundant bounding envelope so
//! that spatial pruning and `ST_Extent` never have to materialize vertices.
//!
//! Supported geometry types:
//! * Point, MultiPoint, LineString, MultiLineString, Polygon, MultiPolygon,
//!   GeometryCollection (heterogeneous, nestable), Envelope.
//!
//! Supported dimensions: X, Y only. No Z/M/ID, no spatial reference identifiers.
//!
//! ## Round trip
//!
//! ```rust
//! use geo_types::{Geometry, Point};
//! use geoblob::codec;
//!
//! let geom = Geometry::Point(Point::new(1.0, 2.0));
//! let bytes = codec::serialize(&geom).unwrap();
//! assert_eq!(codec::deserialize(&bytes).unwrap(), geom);
//! ```
//!
//! ## Envelope-only fast path
//!
//! Recovering the bounding envelope of a value never touches its vertices, no matter
//! how many the value has:
//!
//! ```rust
//! use geo_types::{Coord, Geometry, LineString};
//! use geoblob::codec;
//!
//! let ls = Geometry::LineString(LineString(vec![
//!     Coord { x: 0.0, y: 0.0 },
//!     Coord { x: 10.0, y: 10.0 },
//! ]));
//! let bytes = codec::serialize(&ls).unwrap();
//! let env = codec::deserialize_envelope(&bytes).unwrap();
//! assert_eq!((env.x_min(), env.y_min(), env.x_max(), env.y_max()), (0.0, 0.0, 10.0, 10.0));
//! ```

pub mod adapter;
pub mod codec;
pub mod cursor;
pub mod envelope;
pub mod error;
pub mod extent;
pub mod tag;

pub use envelope::Envelope;
pub use error::{GeoBlobError, Result};
pub use extent::ExtentAggregator;
pub use tag::GeometryTag;
