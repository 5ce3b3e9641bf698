//! Wire contracts: detector output in, code-generation input out.
//!
//! The detector sends `{ id, type, vertices, contains }` objects. Trees that
//! were exported by a previous run (`meta.vertices`, `synthetic`) are
//! accepted as well so edited trees can be fed back through the pipeline.

use acr_geometry::Point;
use serde::{Deserialize, Serialize};

use crate::InferenceResult;
use crate::error::InferenceError;
use crate::id::NodeId;
use crate::kind::Kind;
use crate::primitive::{GridCell, Primitive};
use crate::tree::AcrTree;

/// Detector ids arrive as numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DetectedId {
    Number(u64),
    Text(String),
}

impl DetectedId {
    fn resolve(&self) -> InferenceResult<NodeId> {
        match self {
            Self::Number(raw) => Ok(NodeId::new(*raw)),
            Self::Text(raw) => raw
                .trim()
                .parse::<u64>()
                .map(NodeId::new)
                .map_err(|_| InferenceError::InvalidId(raw.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectedMeta {
    #[serde(default)]
    pub vertices: Vec<Point>,
}

/// One primitive as produced by the shape detector.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectedPrimitive {
    pub id: DetectedId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub vertices: Vec<Point>,
    #[serde(default)]
    pub meta: Option<DetectedMeta>,
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default)]
    pub contains: Vec<DetectedPrimitive>,
}

impl DetectedPrimitive {
    fn vertices(&self) -> Vec<Point> {
        if self.vertices.is_empty() {
            self.meta
                .as_ref()
                .map(|meta| meta.vertices.clone())
                .unwrap_or_default()
        } else {
            self.vertices.clone()
        }
    }
}

impl AcrTree {
    /// Build a tree from detector output, canonicalising rectangle vertices.
    ///
    /// # Errors
    /// Fails on ids that are not integers or appear more than once.
    pub fn from_detected(primitives: &[DetectedPrimitive]) -> InferenceResult<Self> {
        let mut tree = Self::new();
        let mut pending: Vec<(Option<NodeId>, &DetectedPrimitive)> =
            primitives.iter().rev().map(|primitive| (None, primitive)).collect();

        while let Some((parent, detected)) = pending.pop() {
            let id = detected.id.resolve()?;
            let mut primitive =
                Primitive::new(id, Kind::from_label(&detected.kind), detected.vertices());
            primitive.synthetic = detected.synthetic;
            tree.insert(primitive, parent)?;
            pending.extend(detected.contains.iter().rev().map(|child| (Some(id), child)));
        }
        Ok(tree)
    }

    /// Parse detector JSON (an array of primitives) into a tree.
    ///
    /// # Errors
    /// Fails on malformed JSON or invalid / duplicate ids.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let detected: Vec<DetectedPrimitive> = serde_json::from_str(json)?;
        Ok(Self::from_detected(&detected)?)
    }

    /// Snapshot the tree in the shape the code generator consumes.
    pub fn export(&self) -> Vec<ExportedPrimitive> {
        self.roots()
            .iter()
            .filter_map(|&root| self.export_node(root))
            .collect()
    }

    fn export_node(&self, id: NodeId) -> Option<ExportedPrimitive> {
        let node = self.get(id)?;
        let (relative_left, relative_top) = self.relative_offset(id);
        Some(ExportedPrimitive {
            id: id.as_u64(),
            kind: node.kind.to_string(),
            parent_id: node.parent().map(NodeId::as_u64),
            level: node.level(),
            draw: node.draw,
            synthetic: node.synthetic,
            meta: ExportedMeta {
                absolute_width: node.absolute_width(),
                absolute_height: node.absolute_height(),
                relative_width: self.relative_width(id),
                relative_height: self.relative_height(id),
                relative_left,
                relative_top,
                area: node.area(),
                midpoint: node.midpoint(),
                vertices: node.vertices.clone(),
            },
            grid_cell: node.grid_cell,
            contains: node
                .contains()
                .iter()
                .filter_map(|&child| self.export_node(child))
                .collect(),
        })
    }
}

/// Size and position metadata of an exported primitive. Relative values are
/// percentages of the parent at export time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedMeta {
    pub absolute_width: f64,
    pub absolute_height: f64,
    pub relative_width: f64,
    pub relative_height: f64,
    pub relative_left: f64,
    pub relative_top: f64,
    pub area: f64,
    pub midpoint: Option<Point>,
    pub vertices: Vec<Point>,
}

/// A primitive as handed to the code-generation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedPrimitive {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_id: Option<u64>,
    pub level: usize,
    pub draw: bool,
    pub synthetic: bool,
    pub meta: ExportedMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_cell: Option<GridCell>,
    pub contains: Vec<ExportedPrimitive>,
}

impl ExportedPrimitive {
    /// Depth-first search for `id` in this subtree.
    pub fn find(&self, id: u64) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.contains.iter().find_map(|child| child.find(id))
    }
}
