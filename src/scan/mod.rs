//! Coordinate scanning of GeoJSONL feature lines.
//!
//! Decides whether a feature falls inside a bounding box by walking its
//! coordinate text at fixed offsets instead of decoding the JSON.

mod profile;
mod scanner;

pub use profile::{
    ScanProfile, DEFAULT_COORDINATE_OFFSET, DEFAULT_LATITUDE_SKIP, DEFAULT_POINT_ADVANCE,
};
pub use scanner::{Points, Scanner};
