//! Per-run state threaded through every inference stage.

use core::mem;
use log::debug;

use crate::config::InferenceConfig;
use crate::error::Diagnostic;
use crate::id::NodeId;
use crate::tree::AcrTree;

/// Hands out fresh ids for synthetic primitives.
///
/// Scoped to a single run; two runs never share a generator.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// A generator whose first id follows the largest id already in `tree`.
    pub fn for_tree(tree: &AcrTree) -> Self {
        Self::starting_at(tree.max_id().map_or(0, |id| id.as_u64() + 1))
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`Self::next_id`] will return.
    pub fn peek(&self) -> NodeId {
        NodeId::new(self.next)
    }
}

/// Configuration, id generator and collected diagnostics of one run.
#[derive(Debug)]
pub struct PipelineContext<'cfg> {
    pub config: &'cfg InferenceConfig,
    pub ids: IdGenerator,
    diagnostics: Vec<Diagnostic>,
}

impl<'cfg> PipelineContext<'cfg> {
    /// Context for a run over `tree`; synthetic ids start past its largest id.
    pub fn new(config: &'cfg InferenceConfig, tree: &AcrTree) -> Self {
        Self {
            config,
            ids: IdGenerator::for_tree(tree),
            diagnostics: Vec::new(),
        }
    }

    pub fn next_id(&mut self) -> NodeId {
        self.ids.next_id()
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        debug!("{diagnostic}");
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }
}
