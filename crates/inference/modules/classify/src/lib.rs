//! Rule-based type classification.
//!
//! Classification rewrites the `kind` of the primitives in one sibling list.
//! It is a fixed, ordered list of [`ClassificationRule`]s; each rule scans
//! the siblings once and never recurses (the orchestrator drives recursion).
//! Apart from image marker pruning no rule touches geometry or structure.

mod rules;

pub use rules::{
    FooterDetection, ImageDetection, LabelMapping, NavigationDetection, PanelDetection,
    RowDetection, TextDetection, WidgetDetection, fragments_in_band, shares_one_band,
};

use acr_model::{AcrTree, InferenceResult, NodeId, PipelineContext};
use core::fmt;
use log::trace;

/// One classification pass over a sibling list.
pub trait ClassificationRule {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite kinds of `siblings` (and, for some rules, their children).
    ///
    /// # Errors
    /// Propagates tree errors; rules themselves absorb geometric anomalies.
    fn apply(
        &self,
        tree: &mut AcrTree,
        ctx: &mut PipelineContext<'_>,
        siblings: &[NodeId],
    ) -> InferenceResult<()>;
}

/// The built-in rules in the order they must run.
pub fn default_rules() -> Vec<Box<dyn ClassificationRule>> {
    vec![
        Box::new(LabelMapping),
        Box::new(PanelDetection),
        Box::new(RowDetection),
        Box::new(NavigationDetection),
        Box::new(FooterDetection),
        Box::new(ImageDetection),
        Box::new(WidgetDetection),
        Box::new(TextDetection),
    ]
}

/// Ordered rule set applied to sibling lists.
pub struct Classifier {
    rules: Vec<Box<dyn ClassificationRule>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Classifier {
    pub fn new(rules: Vec<Box<dyn ClassificationRule>>) -> Self {
        Self { rules }
    }

    /// Append a rule after the built-in ones.
    #[must_use]
    pub fn with_rule(mut self, rule: Box<dyn ClassificationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every rule, in order, over the children of `parent`.
    ///
    /// # Errors
    /// Stops at the first rule that fails.
    pub fn classify_children(
        &self,
        tree: &mut AcrTree,
        ctx: &mut PipelineContext<'_>,
        parent: Option<NodeId>,
    ) -> InferenceResult<()> {
        for rule in &self.rules {
            // Re-read per rule; a custom rule may restructure the level.
            let siblings = tree.children(parent).to_vec();
            trace!("rule {} over {} siblings", rule.name(), siblings.len());
            rule.apply(tree, ctx, &siblings)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}
