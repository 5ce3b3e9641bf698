//! Reductions and predicates over vertex lists.

use crate::bounds::{x_extent, y_extent};
use crate::point::Point;

/// Largest Y coordinate (the visually lowest edge).
pub fn highest_y(vertices: &[Point]) -> Option<f64> {
    y_extent(vertices).map(|extent| extent.max)
}

/// Smallest Y coordinate (the visually highest edge).
pub fn lowest_y(vertices: &[Point]) -> Option<f64> {
    y_extent(vertices).map(|extent| extent.min)
}

pub fn highest_x(vertices: &[Point]) -> Option<f64> {
    x_extent(vertices).map(|extent| extent.max)
}

pub fn lowest_x(vertices: &[Point]) -> Option<f64> {
    x_extent(vertices).map(|extent| extent.min)
}

/// Shapes with fewer than two vertices have no usable extent.
#[inline]
pub fn is_degenerate(vertices: &[Point]) -> bool {
    vertices.len() < 2
}

/// True when the X extents of both shapes intersect, i.e. the shapes would
/// stack in one column.
pub fn vertically_overlaps(first: &[Point], second: &[Point]) -> bool {
    match (x_extent(first), x_extent(second)) {
        (Some(lhs), Some(rhs)) => lhs.intersects(&rhs),
        _ => false,
    }
}

/// True when the Y extents of both shapes intersect, i.e. the shapes share a
/// row band and would sit side by side horizontally.
pub fn horizontally_overlaps(first: &[Point], second: &[Point]) -> bool {
    match (y_extent(first), y_extent(second)) {
        (Some(lhs), Some(rhs)) => lhs.intersects(&rhs),
        _ => false,
    }
}

/// Order a rectangle's corners as `[top-left, bottom-left, bottom-right, top-right]`.
///
/// Sorting by `x + y` puts the top-left corner first and the bottom-right
/// corner last; of the two remaining corners the one with the smaller X is
/// bottom-left. Inputs that are not exactly four points are returned as-is.
pub fn canonicalize_vertices(mut vertices: Vec<Point>) -> Vec<Point> {
    if vertices.len() != 4 {
        return vertices;
    }

    vertices.sort_by(|lhs, rhs| (lhs.x + lhs.y).total_cmp(&(rhs.x + rhs.y)));

    let (first_mid, second_mid) = (vertices[1], vertices[2]);
    let first_is_left = first_mid.x < second_mid.x
        || (first_mid.x.total_cmp(&second_mid.x).is_eq() && first_mid.y > second_mid.y);
    let (bottom_left, top_right) = if first_is_left {
        (first_mid, second_mid)
    } else {
        (second_mid, first_mid)
    };

    vec![vertices[0], bottom_left, vertices[3], top_right]
}

/// Check the canonical axis-alignment invariant of a 4-vertex rectangle.
pub fn is_axis_aligned(vertices: &[Point]) -> bool {
    let [top_left, bottom_left, bottom_right, top_right] = vertices else {
        return false;
    };
    same(top_left.x, bottom_left.x)
        && same(bottom_left.y, bottom_right.y)
        && same(bottom_right.x, top_right.x)
        && same(top_left.y, top_right.y)
}

#[inline]
fn same(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() <= f64::EPSILON * lhs.abs().max(rhs.abs()).max(1.0)
}

/// Arithmetic mean of the vertices, `None` for an empty shape.
pub fn midpoint(vertices: &[Point]) -> Option<Point> {
    if vertices.is_empty() {
        return None;
    }
    let count = vertices.len() as f64;
    let (sum_x, sum_y) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), point| (sx + point.x, sy + point.y));
    Some(Point::new(sum_x / count, sum_y / count))
}

/// Move every vertex by `(dx, dy)` in place.
pub fn translate(vertices: &mut [Point], dx: f64, dy: f64) {
    for vertex in vertices.iter_mut() {
        *vertex = vertex.offset(dx, dy);
    }
}
