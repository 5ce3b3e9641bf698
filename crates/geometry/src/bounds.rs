//! Closed one-dimensional extents and axis-aligned bounding boxes.

use crate::point::Point;

/// A closed interval `[min, max]` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    #[inline]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Closed-interval intersection test. Touching edges count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.max < other.min || self.min > other.max)
    }

    /// Smallest extent covering both.
    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Extent of the vertex set along the X axis, `None` when empty.
pub fn x_extent(vertices: &[Point]) -> Option<Extent> {
    extent_by(vertices, |point| point.x)
}

/// Extent of the vertex set along the Y axis, `None` when empty.
pub fn y_extent(vertices: &[Point]) -> Option<Extent> {
    extent_by(vertices, |point| point.y)
}

fn extent_by(vertices: &[Point], axis: impl Fn(&Point) -> f64) -> Option<Extent> {
    let first = axis(vertices.first()?);
    let (min, max) = vertices
        .iter()
        .map(axis)
        .fold((first, first), |(lo, hi), value| (lo.min(value), hi.max(value)));
    Some(Extent { min, max })
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounding box of a vertex set, `None` when empty.
    pub fn of(vertices: &[Point]) -> Option<Self> {
        let xs = x_extent(vertices)?;
        let ys = y_extent(vertices)?;
        Some(Self::from_extents(xs, ys))
    }

    #[inline]
    pub fn from_extents(xs: Extent, ys: Extent) -> Self {
        Self {
            min_x: xs.min,
            min_y: ys.min,
            max_x: xs.max,
            max_y: ys.max,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn x_extent(&self) -> Extent {
        Extent::new(self.min_x, self.max_x)
    }

    #[inline]
    pub fn y_extent(&self) -> Extent {
        Extent::new(self.min_y, self.max_y)
    }

    /// Grow the box by `margin` on every side.
    #[inline]
    #[must_use]
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_extents(
            self.x_extent().union(&other.x_extent()),
            self.y_extent().union(&other.y_extent()),
        )
    }

    /// Corners in canonical `[top-left, bottom-left, bottom-right, top-right]` order.
    pub fn corners(&self) -> Vec<Point> {
        vec![
            Point::new(self.min_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.max_x, self.min_y),
        ]
    }
}
