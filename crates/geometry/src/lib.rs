//! Geometry kernel for abstract component inference.
//!
//! Pure functions over vertex sets: extent queries, overlap predicates,
//! canonical vertex ordering, centroid and bounding-box computation.
//! Nothing here allocates beyond its return value and nothing panics on
//! empty input; degenerate input yields `None`/`false`.

mod bounds;
pub use bounds::{BoundingBox, Extent, x_extent, y_extent};

mod point;
pub use point::{Point, to_local};

mod vertices;
pub use vertices::{
    canonicalize_vertices, highest_x, highest_y, horizontally_overlaps, is_axis_aligned,
    is_degenerate, lowest_x, lowest_y, midpoint, translate, vertically_overlaps,
};
