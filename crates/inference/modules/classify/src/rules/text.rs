use acr_model::{AcrTree, InferenceResult, Kind, NodeId, PipelineContext};

use super::{children_of_kind, is_container_like, set_kind};
use crate::ClassificationRule;

/// Text blocks are sketched as lines: one centred line is a heading, two or
/// more horizontal lines a paragraph. Lines narrower than the configured
/// share of the container are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDetection;

impl TextDetection {
    fn wide_lines(tree: &AcrTree, parent: NodeId, kind: &Kind, min_width: f64) -> usize {
        children_of_kind(tree, parent, kind)
            .into_iter()
            .filter(|&line| tree.relative_width(line) >= min_width)
            .count()
    }
}

impl ClassificationRule for TextDetection {
    fn name(&self) -> &'static str {
        "text"
    }

    fn apply(
        &self,
        tree: &mut AcrTree,
        ctx: &mut PipelineContext<'_>,
        siblings: &[NodeId],
    ) -> InferenceResult<()> {
        let min_width = ctx.config.header_min_relative_width;
        for &id in siblings {
            if !is_container_like(tree, id) {
                continue;
            }
            if Self::wide_lines(tree, id, &Kind::HorizontalLine, min_width) >= 2 {
                set_kind(tree, id, Kind::Paragraph);
            } else if Self::wide_lines(tree, id, &Kind::CenteredLine, min_width) == 1 {
                set_kind(tree, id, Kind::Header);
            }
        }
        Ok(())
    }
}
