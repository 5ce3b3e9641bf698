//! Post-order driver tying the inference stages together.

use acr_model::{
    AcrTree, Diagnostic, ErrorPolicy, InferenceConfig, InferenceResult, Kind, NodeId,
    PipelineContext,
};
use anyhow::{Context as _, Result};
use inference_classify::Classifier;
use inference_compound::match_level;
use inference_filter::{filter_primitives, mark_drawable};
use inference_grid::apportion_row;
use inference_nesting::nest_level;
use log::{info, warn};
use tracing::{debug_span, info_span};

use crate::options::PipelineOptions;
use crate::output::PipelineOutput;

/// Inference pipeline: configuration, stage switches and classification rules.
///
/// A pipeline holds no per-run state; every run gets its own
/// [`PipelineContext`], so one pipeline can serve any number of runs.
#[derive(Debug, Default)]
pub struct Pipeline {
    config: InferenceConfig,
    options: PipelineOptions,
    classifier: Classifier,
}

impl Pipeline {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            config,
            options: PipelineOptions::default(),
            classifier: Classifier::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Run every stage over `tree` and return the annotated tree.
    ///
    /// # Errors
    /// Under [`ErrorPolicy::Abort`], the first structural error (cyclic
    /// reparent, grid overflow) ends the run.
    pub fn run(&self, mut tree: AcrTree) -> Result<PipelineOutput> {
        let _span = info_span!("inference.run", primitives = tree.len()).entered();
        let mut ctx = PipelineContext::new(&self.config, &tree);

        self.process_guarded(&mut tree, &mut ctx, None)
            .context("inference run aborted")?;
        self.finish(&mut tree)?;

        info!(
            "inference produced {} primitives with {} diagnostics",
            tree.len(),
            ctx.diagnostics().len()
        );
        Ok(PipelineOutput {
            tree,
            diagnostics: ctx.take_diagnostics(),
        })
    }

    /// Parse detector JSON and run the pipeline on it.
    ///
    /// # Errors
    /// Fails on malformed input or, see [`Self::run`], on structural errors.
    pub fn run_json(&self, json: &str) -> Result<PipelineOutput> {
        let tree = AcrTree::from_json_str(json).context("failed to read detector output")?;
        self.run(tree)
    }

    /// Re-run nesting and classification below `root` after an edit, leaving
    /// the rest of the tree alone. `root` itself keeps its kind.
    ///
    /// # Errors
    /// Fails if `root` is unknown or, under [`ErrorPolicy::Abort`], on
    /// structural errors.
    pub fn rerun_subtree(&self, tree: &mut AcrTree, root: NodeId) -> Result<Vec<Diagnostic>> {
        let _span = info_span!("inference.rerun", root = %root).entered();
        tree.node(root)?;
        let mut ctx = PipelineContext::new(&self.config, tree);
        self.process_guarded(tree, &mut ctx, Some(root))
            .with_context(|| format!("re-inference below {root} aborted"))?;
        self.finish(tree)?;
        Ok(ctx.take_diagnostics())
    }

    fn finish(&self, tree: &mut AcrTree) -> Result<()> {
        if self.options.remove_markers {
            filter_primitives(tree, &self.config)?;
        }
        mark_drawable(tree, &self.config);
        Ok(())
    }

    /// Process the children of `parent`, absorbing a failure as a
    /// [`Diagnostic::SkippedSubtree`] when the policy allows it.
    fn process_guarded(
        &self,
        tree: &mut AcrTree,
        ctx: &mut PipelineContext<'_>,
        parent: Option<NodeId>,
    ) -> InferenceResult<()> {
        let outcome = self.process(tree, ctx, parent);
        absorb(ctx, parent, outcome)
    }

    /// Children first, then this level: nest, classify, match, apportion.
    fn process(
        &self,
        tree: &mut AcrTree,
        ctx: &mut PipelineContext<'_>,
        parent: Option<NodeId>,
    ) -> InferenceResult<()> {
        for child in tree.children(parent).to_vec() {
            self.process_guarded(tree, ctx, Some(child))?;
        }

        let _span = debug_span!("inference.level", parent = ?parent).entered();
        for row in nest_level(tree, ctx, parent)? {
            self.settle_level(tree, ctx, Some(row))?;
        }
        self.settle_level(tree, ctx, parent)
    }

    /// Classification and the optional per-level stages for `parent`'s children.
    fn settle_level(
        &self,
        tree: &mut AcrTree,
        ctx: &mut PipelineContext<'_>,
        parent: Option<NodeId>,
    ) -> InferenceResult<()> {
        self.classifier.classify_children(tree, ctx, parent)?;
        let siblings = tree.children(parent).to_vec();

        if self.options.match_compounds {
            match_level(tree, ctx, &siblings);
        }
        if self.options.apportion_grid {
            for &row in &siblings {
                let outcome = apportion_row(tree, ctx, row).map(|_| ());
                absorb(ctx, Some(row), outcome)?;
            }
        }
        Ok(())
    }
}

/// Apply the run's error policy to a stage outcome.
pub(crate) fn absorb(
    ctx: &mut PipelineContext<'_>,
    node: Option<NodeId>,
    outcome: InferenceResult<()>,
) -> InferenceResult<()> {
    match outcome {
        Err(err) if ctx.config.error_policy == ErrorPolicy::SkipSubtree => {
            warn!("skipping {node:?}: {err}");
            ctx.record(Diagnostic::SkippedSubtree {
                node,
                reason: err.to_string(),
            });
            Ok(())
        }
        other => other,
    }
}

/// Whether `id` is a row eligible for grid apportionment.
pub(crate) fn is_row(tree: &AcrTree, id: NodeId) -> bool {
    tree.get(id).is_some_and(|node| node.kind == Kind::Row)
}
