//! The codec: serialize/deserialize geometries and envelopes to and from the wire
//! format, plus the envelope-only fast path (§4.4).

pub mod envelope_only;
pub mod reader;
pub mod writer;

pub use envelope_only::{deserialize_envelope, geometry_type};
pub use reader::deserialize;
pub use writer::{serialize, serialize_envelope};
