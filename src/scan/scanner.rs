//! Fixed-offset coordinate scanner.
//!
//! Walks the `[lon, lat]` pairs of a feature line by searching for the
//! `,` and `]` delimiters from a cursor, starting at the profile's
//! coordinate offset. Nothing is allocated per line and the line is
//! never decoded as JSON.

use geo::Coord;
use tracing::trace;

use super::ScanProfile;
use crate::models::BoundingBox;

/// Tests feature lines against a bounding box.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    profile: ScanProfile,
}

impl Scanner {
    pub fn new(profile: ScanProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ScanProfile {
        &self.profile
    }

    /// True as soon as one point of the line lies inside `bbox`.
    ///
    /// Malformed input (line too short, missing delimiter, bad number)
    /// ends the walk and counts as "not inside".
    pub fn contains(&self, line: &[u8], bbox: BoundingBox) -> bool {
        self.points(line).any(|point| bbox.contains(point))
    }

    /// Iterate the coordinate pairs of a line, in file order.
    pub fn points<'a>(&self, line: &'a [u8]) -> Points<'a> {
        Points {
            line,
            cursor: self.profile.coordinate_offset,
            profile: self.profile,
            done: false,
        }
    }
}

/// Iterator over the `[lon, lat]` pairs of one feature line.
///
/// Stops silently at the first anomaly.
pub struct Points<'a> {
    line: &'a [u8],
    cursor: usize,
    profile: ScanProfile,
    done: bool,
}

impl<'a> Points<'a> {
    fn next_point(&mut self) -> Option<Coord<f32>> {
        let start = self.cursor;
        let rest = self.line.get(start..)?;

        let comma = start + rest.iter().position(|&b| b == b',')?;
        let close = match rest.iter().position(|&b| b == b']') {
            Some(pos) => start + pos,
            None => {
                trace!("No closing bracket after byte {}", start);
                return None;
            }
        };

        let lat_start = comma + self.profile.latitude_skip;
        if close < lat_start {
            trace!("Malformed coordinate pair at byte {}", start);
            return None;
        }

        let lon = parse_token(&self.line[start..comma])?;
        let lat = parse_token(&self.line[lat_start..close])?;

        self.cursor = close + self.profile.point_advance;
        Some(Coord { x: lon, y: lat })
    }
}

impl<'a> Iterator for Points<'a> {
    type Item = Coord<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let point = self.next_point();
        // The first point is always attempted; later ones only while the
        // cursor is still inside the line.
        if point.is_none() || self.cursor >= self.line.len() {
            self.done = true;
        }
        point
    }
}

/// Parse a decimal token with `.` as separator, ignoring surrounding
/// whitespace.
fn parse_token(token: &[u8]) -> Option<f32> {
    let text = std::str::from_utf8(token).ok()?.trim();
    match text.parse::<f32>() {
        Ok(value) => Some(value),
        Err(_) => {
            trace!("Unparseable coordinate token {:?}", text);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: &str =
        r#"{"type": "Feature", "properties":{}, "geometry":{"type": "Polygon", "coordinates": [[["#;

    fn feature_line(points: &[(f32, f32)]) -> String {
        let ring = points
            .iter()
            .map(|(lon, lat)| format!("{lon}, {lat}"))
            .collect::<Vec<_>>()
            .join("], [");
        format!("{PREAMBLE}{ring}]]]}}}}")
    }

    fn bbox() -> BoundingBox {
        BoundingBox::from_corners(8.7853, 49.0499, 8.8199, 49.0749)
    }

    #[test]
    fn test_points_in_order() {
        let line = feature_line(&[(8.80, 49.06), (8.81, 49.07), (8.80, 49.06)]);
        let points: Vec<_> = Scanner::default().points(line.as_bytes()).collect();
        assert_eq!(
            points,
            vec![
                Coord { x: 8.80, y: 49.06 },
                Coord { x: 8.81, y: 49.07 },
                Coord { x: 8.80, y: 49.06 },
            ]
        );
    }

    #[test]
    fn test_first_point_inside() {
        let line = feature_line(&[(8.80, 49.06), (8.81, 49.07)]);
        assert!(Scanner::default().contains(line.as_bytes(), bbox()));
    }

    #[test]
    fn test_later_point_inside() {
        let line = feature_line(&[(8.70, 49.06), (8.71, 49.06), (8.80, 49.06)]);
        assert!(Scanner::default().contains(line.as_bytes(), bbox()));
    }

    #[test]
    fn test_all_points_outside() {
        let line = feature_line(&[(8.70, 49.06), (8.71, 49.06), (8.72, 49.07)]);
        assert!(!Scanner::default().contains(line.as_bytes(), bbox()));
    }

    #[test]
    fn test_point_on_edge_inside() {
        let bbox = BoundingBox::from_corners(5.0, 40.0, 10.0, 50.0);
        let line = feature_line(&[(10.0, 50.0)]);
        assert!(Scanner::default().contains(line.as_bytes(), bbox));
        let line = feature_line(&[(5.0, 45.0)]);
        assert!(Scanner::default().contains(line.as_bytes(), bbox));
    }

    #[test]
    fn test_negative_coordinates() {
        let bbox = BoundingBox::from_corners(-84.6, 33.2, -84.3, 33.9);
        let line = feature_line(&[(-84.5, 33.5), (-84.4, 33.6)]);
        assert!(Scanner::default().contains(line.as_bytes(), bbox));
    }

    #[test]
    fn test_short_line_not_inside() {
        let scanner = Scanner::default();
        assert!(!scanner.contains(b"", bbox()));
        assert!(!scanner.contains(br#"{"type": "Feature"}"#, bbox()));
        assert_eq!(scanner.points(b"short").count(), 0);
    }

    #[test]
    fn test_missing_delimiters_not_inside() {
        let line = format!("{PREAMBLE}8.80 49.06");
        assert!(!Scanner::default().contains(line.as_bytes(), bbox()));

        let line = format!("{PREAMBLE}8.80, 49.06");
        assert!(!Scanner::default().contains(line.as_bytes(), bbox()));
    }

    #[test]
    fn test_garbage_token_not_inside() {
        let line = format!("{PREAMBLE}abc, 49.06]]]}}}}");
        assert!(!Scanner::default().contains(line.as_bytes(), bbox()));
    }

    #[test]
    fn test_anomaly_stops_walk() {
        // A bad second point hides a good third one
        let line = format!("{PREAMBLE}1.0, 1.0], [x, y], [8.80, 49.06]]]}}}}");
        let points: Vec<_> = Scanner::default().points(line.as_bytes()).collect();
        assert_eq!(points, vec![Coord { x: 1.0, y: 1.0 }]);
        assert!(!Scanner::default().contains(line.as_bytes(), bbox()));
    }

    #[test]
    fn test_wrong_offset_not_inside() {
        let line = r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[8.80, 49.06]]]}}"#;
        assert!(!Scanner::default().contains(line.as_bytes(), bbox()));

        let scanner = Scanner::new(ScanProfile {
            coordinate_offset: 88,
            ..ScanProfile::default()
        });
        assert!(scanner.contains(line.as_bytes(), bbox()));
    }

    #[test]
    fn test_non_utf8_outside_tokens() {
        let mut line = feature_line(&[(8.80, 49.06)]).into_bytes();
        line[20] = 0xff;
        assert!(Scanner::default().contains(&line, bbox()));
    }
}
