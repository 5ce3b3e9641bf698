//! Two-dimensional points in detector (image) coordinates.
//!
//! The Y axis grows downwards, so the "highest" Y value is the visually
//! lowest edge of a shape.

use serde::{Deserialize, Serialize};

/// A point in page coordinates.
///
/// Serialized as a `[x, y]` pair to match the detector wire format.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Convert a global page coordinate into coordinates local to a bounding
/// box whose top-left corner sits at `origin`.
#[inline]
pub fn to_local(point: Point, origin: Point) -> Point {
    Point::new(point.x - origin.x, point.y - origin.y)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Wire-format samples are valid JSON")]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_pair() {
        let point = Point::new(3.0, 4.5);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, "[3.0,4.5]");
        let back: Point = serde_json::from_str("[7, 8]").unwrap();
        assert_eq!(back, Point::new(7.0, 8.0));
    }

    #[test]
    fn local_coordinates() {
        let local = to_local(Point::new(15.0, 30.0), Point::new(10.0, 10.0));
        assert_eq!(local, Point::new(5.0, 20.0));
    }
}
