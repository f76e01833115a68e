//! Extraction pipeline: read, scan, write, report.
//!
//! Streams a GeoJSONL source through the [`Scanner`](crate::scan::Scanner)
//! and writes matching lines as a GeoJSON FeatureCollection.

mod extractor;
mod output;
mod progress;
mod source;

pub use extractor::{ExtractOptions, ExtractSummary, Extractor};
pub use progress::{group_thousands, FOUND_MESSAGE};

use std::path::{Path, PathBuf};

use source::Compression;

/// Default output location: `<stem>-extracted.geojson` next to the input.
///
/// A trailing `.gz` is dropped before taking the stem, so
/// `de.geojsonl.gz` becomes `de-extracted.geojson`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = match Compression::from_path(input) {
        Compression::Gzip => input.file_stem().map(PathBuf::from),
        Compression::None => input.file_name().map(PathBuf::from),
    }
    .unwrap_or_default();

    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    input.with_file_name(format!("{stem}-extracted.geojson"))
}
