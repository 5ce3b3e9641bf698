//! A single node of the ACR tree.

use acr_geometry::{BoundingBox, Point, midpoint};
use serde::{Deserialize, Serialize};

use crate::id::NodeId;
use crate::kind::Kind;

/// Column allocation assigned by grid apportionment to a child of a row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    /// Number of grid columns occupied.
    pub count: u32,
    /// Fractional share left over after flooring (negative once a remainder
    /// cell has been handed out).
    pub clip_size: f64,
}

/// One UI element candidate.
///
/// Extents are always derived from `vertices`; relative sizes depend on the
/// current parent and are therefore answered by [`crate::AcrTree`], never
/// cached here.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub id: NodeId,
    pub kind: Kind,
    /// Canonical `[top-left, bottom-left, bottom-right, top-right]` for rectangles.
    pub vertices: Vec<Point>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) level: usize,
    pub(crate) contains: Vec<NodeId>,
    pub grid_cell: Option<GridCell>,
    /// Whether the editor should draw this primitive.
    pub draw: bool,
    /// Created by the pipeline rather than the detector.
    pub synthetic: bool,
}

impl Primitive {
    /// A detached primitive. Rectangle vertices are canonicalised.
    pub fn new(id: NodeId, kind: Kind, vertices: Vec<Point>) -> Self {
        Self {
            id,
            kind,
            vertices: acr_geometry::canonicalize_vertices(vertices),
            parent: None,
            level: 0,
            contains: Vec::new(),
            grid_cell: None,
            draw: true,
            synthetic: false,
        }
    }

    /// A pipeline-generated wrapper spanning `bounds`.
    pub fn synthetic(id: NodeId, kind: Kind, bounds: &BoundingBox) -> Self {
        let mut primitive = Self::new(id, kind, bounds.corners());
        primitive.synthetic = true;
        primitive
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Ordered child ids.
    pub fn contains(&self) -> &[NodeId] {
        &self.contains
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of(&self.vertices)
    }

    pub fn absolute_width(&self) -> f64 {
        self.bounding_box().map_or(0.0, |bbox| bbox.width())
    }

    pub fn absolute_height(&self) -> f64 {
        self.bounding_box().map_or(0.0, |bbox| bbox.height())
    }

    pub fn area(&self) -> f64 {
        self.absolute_width() * self.absolute_height()
    }

    pub fn midpoint(&self) -> Option<Point> {
        midpoint(&self.vertices)
    }

    /// Smallest Y of the shape (its visual top edge), 0 for an empty shape.
    pub fn top_y(&self) -> f64 {
        acr_geometry::lowest_y(&self.vertices).unwrap_or(0.0)
    }

    /// X of the top-left vertex, 0 for an empty shape.
    pub fn left_x(&self) -> f64 {
        self.vertices.first().map_or(0.0, |vertex| vertex.x)
    }

    pub fn highest_y(&self) -> Option<f64> {
        acr_geometry::highest_y(&self.vertices)
    }

    pub fn lowest_y(&self) -> Option<f64> {
        acr_geometry::lowest_y(&self.vertices)
    }

    pub fn highest_x(&self) -> Option<f64> {
        acr_geometry::highest_x(&self.vertices)
    }

    pub fn lowest_x(&self) -> Option<f64> {
        acr_geometry::lowest_x(&self.vertices)
    }

    pub fn is_degenerate(&self) -> bool {
        acr_geometry::is_degenerate(&self.vertices)
    }
}
