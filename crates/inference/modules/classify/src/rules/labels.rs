use acr_model::{AcrTree, Diagnostic, InferenceResult, Kind, NodeId, PipelineContext};

use super::set_kind;
use crate::ClassificationRule;

/// Rewrites detector labels through the configured label table.
///
/// Labels without an entry pass through unchanged; labels the pipeline does
/// not know at all are additionally reported as [`Diagnostic::UnmappedLabel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelMapping;

impl ClassificationRule for LabelMapping {
    fn name(&self) -> &'static str {
        "label-mapping"
    }

    fn apply(
        &self,
        tree: &mut AcrTree,
        ctx: &mut PipelineContext<'_>,
        siblings: &[NodeId],
    ) -> InferenceResult<()> {
        for &id in siblings {
            let kind = &tree.node(id)?.kind;
            match ctx.config.semantic_label(kind.as_str()) {
                Some(mapped) => set_kind(tree, id, Kind::from_label(mapped)),
                None => {
                    if let Kind::Raw(label) = kind {
                        let label = label.clone();
                        ctx.record(Diagnostic::UnmappedLabel { node: id, label });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Top-level containers are panels: the pages of the sketched site.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelDetection;

impl ClassificationRule for PanelDetection {
    fn name(&self) -> &'static str {
        "panel"
    }

    fn apply(
        &self,
        tree: &mut AcrTree,
        _ctx: &mut PipelineContext<'_>,
        siblings: &[NodeId],
    ) -> InferenceResult<()> {
        for &id in siblings {
            let node = tree.node(id)?;
            if node.level() == 0 && matches!(node.kind, Kind::Container | Kind::Rectangle) {
                set_kind(tree, id, Kind::Panel);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Hand-built sibling lists are consistent")]
mod tests {
    use super::*;
    use acr_model::{InferenceConfig, Primitive};

    #[test]
    fn mapped_labels_are_rewritten_and_unknown_ones_reported() {
        let mut tree = AcrTree::new();
        tree.insert(Primitive::new(NodeId::new(0), Kind::Panel, Vec::new()), None)
            .unwrap();
        let children = [
            (1, Kind::Rectangle),
            (2, Kind::Raw("squiggle".to_owned())),
            (3, Kind::Triangle),
        ];
        for (id, kind) in children {
            let child = Primitive::new(NodeId::new(id), kind, Vec::new());
            tree.insert(child, Some(NodeId::new(0))).unwrap();
        }
        let config = InferenceConfig::default();
        let mut ctx = PipelineContext::new(&config, &tree);
        let siblings = tree.children(Some(NodeId::new(0))).to_vec();

        LabelMapping.apply(&mut tree, &mut ctx, &siblings).unwrap();

        assert_eq!(tree.get(NodeId::new(1)).unwrap().kind, Kind::Container);
        assert_eq!(
            tree.get(NodeId::new(2)).unwrap().kind,
            Kind::Raw("squiggle".to_owned())
        );
        assert_eq!(tree.get(NodeId::new(3)).unwrap().kind, Kind::Triangle);
        assert_eq!(
            ctx.diagnostics(),
            &[Diagnostic::UnmappedLabel {
                node: NodeId::new(2),
                label: "squiggle".to_owned()
            }]
        );
    }

    #[test]
    fn only_top_level_containers_become_panels() {
        let mut tree = AcrTree::new();
        tree.insert(Primitive::new(NodeId::new(1), Kind::Container, Vec::new()), None)
            .unwrap();
        tree.insert(Primitive::new(NodeId::new(2), Kind::Row, Vec::new()), None)
            .unwrap();
        tree.insert(
            Primitive::new(NodeId::new(3), Kind::Container, Vec::new()),
            Some(NodeId::new(1)),
        )
        .unwrap();
        let config = InferenceConfig::default();
        let mut ctx = PipelineContext::new(&config, &tree);

        let roots = tree.roots().to_vec();
        PanelDetection.apply(&mut tree, &mut ctx, &roots).unwrap();
        PanelDetection
            .apply(&mut tree, &mut ctx, &[NodeId::new(3)])
            .unwrap();

        assert_eq!(tree.get(NodeId::new(1)).unwrap().kind, Kind::Panel);
        assert_eq!(tree.get(NodeId::new(2)).unwrap().kind, Kind::Row);
        assert_eq!(tree.get(NodeId::new(3)).unwrap().kind, Kind::Container);
    }
}
