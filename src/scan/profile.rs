//! Structural constants of one GeoJSONL dataset.
//!
//! The scanner does not parse JSON. It relies on every line of a dataset
//! sharing the same preamble length and the same separator conventions
//! inside the coordinate array. Those facts live here.

use serde::Deserialize;

/// Byte offset of the first longitude in the building footprint lines.
pub const DEFAULT_COORDINATE_OFFSET: usize = 86;

/// Bytes between the lon/lat comma and the latitude (`", "`).
pub const DEFAULT_LATITUDE_SKIP: usize = 2;

/// Bytes from a point's closing `]` to the next longitude (`"], ["`).
pub const DEFAULT_POINT_ADVANCE: usize = 4;

/// Layout of the coordinate array within a feature line.
///
/// A dataset with a different key order or whitespace needs its own
/// profile. A wrong profile does not error; every line simply scans as
/// "not inside".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanProfile {
    /// Where the first longitude token starts.
    pub coordinate_offset: usize,
    /// Skip from the comma to the start of the latitude token.
    pub latitude_skip: usize,
    /// Skip from a closing bracket to the next longitude token.
    pub point_advance: usize,
}

impl Default for ScanProfile {
    fn default() -> Self {
        Self {
            coordinate_offset: DEFAULT_COORDINATE_OFFSET,
            latitude_skip: DEFAULT_LATITUDE_SKIP,
            point_advance: DEFAULT_POINT_ADVANCE,
        }
    }
}

impl ScanProfile {
    /// Cheap probe that the line's preamble has the expected length.
    ///
    /// True when the byte right before the coordinate offset is the `[`
    /// that opens the first point.
    pub fn preamble_matches(&self, line: &[u8]) -> bool {
        self.coordinate_offset > 0
            && line.get(self.coordinate_offset - 1).copied() == Some(b'[')
    }
}
