//! bbox-extractor - Extract building footprints inside a bounding box
//!
//! Streams a newline-delimited GeoJSON file and writes the features whose
//! coordinates fall inside a lon/lat box as one GeoJSON FeatureCollection.

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod pipeline;
pub mod scan;

pub use error::{ExtractError, Result};
pub use logger::{Logger, TracingLogger};
pub use models::BoundingBox;
pub use pipeline::{default_output_path, ExtractOptions, ExtractSummary, Extractor};
pub use scan::{ScanProfile, Scanner};
