use acr_model::{AcrTree, InferenceResult, Kind, NodeId, PipelineContext};

use super::{children_of_kind, is_container_like, set_kind};
use crate::ClassificationRule;

/// Image placeholders are drawn as a box with crossing diagonals; the
/// detector reports the crossing as a `centered_intersection` and the corner
/// wedges as triangles. Such a container becomes an Image and its triangle
/// markers are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDetection;

impl ClassificationRule for ImageDetection {
    fn name(&self) -> &'static str {
        "image"
    }

    fn apply(
        &self,
        tree: &mut AcrTree,
        _ctx: &mut PipelineContext<'_>,
        siblings: &[NodeId],
    ) -> InferenceResult<()> {
        for &id in siblings {
            if !is_container_like(tree, id)
                || children_of_kind(tree, id, &Kind::CenteredIntersection).is_empty()
            {
                continue;
            }
            set_kind(tree, id, Kind::Image);
            for triangle in children_of_kind(tree, id, &Kind::Triangle) {
                tree.remove_subtree(triangle)?;
            }
        }
        Ok(())
    }
}
