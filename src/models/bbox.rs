//! Geographic bounding box used as the extraction filter.

use geo::{Coord, Rect};

/// Axis-aligned lon/lat rectangle.
///
/// Built once from two corner points in any order; `geo::Rect` normalizes
/// the corners so `min <= max` holds on both axes. Copied by value into
/// every containment test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    rect: Rect<f32>,
}

impl BoundingBox {
    /// Create a box from two opposite corners, given as (lon, lat) pairs.
    pub fn from_corners(lon1: f32, lat1: f32, lon2: f32, lat2: f32) -> Self {
        Self {
            rect: Rect::new(Coord { x: lon1, y: lat1 }, Coord { x: lon2, y: lat2 }),
        }
    }

    pub fn min_lon(&self) -> f32 {
        self.rect.min().x
    }

    pub fn min_lat(&self) -> f32 {
        self.rect.min().y
    }

    pub fn max_lon(&self) -> f32 {
        self.rect.max().x
    }

    pub fn max_lat(&self) -> f32 {
        self.rect.max().y
    }

    /// Inclusive containment: points on an edge count as inside.
    ///
    /// No epsilon is applied. NaN coordinates are never inside.
    #[inline]
    pub fn contains(&self, point: Coord<f32>) -> bool {
        let min = self.rect.min();
        let max = self.rect.max();
        min.x <= point.x && point.x <= max.x && min.y <= point.y && point.y <= max.y
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] - [{}, {}]",
            self.min_lon(),
            self.min_lat(),
            self.max_lon(),
            self.max_lat()
        )
    }
}
