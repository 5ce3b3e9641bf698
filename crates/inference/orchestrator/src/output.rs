use acr_model::io::ExportedPrimitive;
use acr_model::{AcrTree, Diagnostic};
use anyhow::{Context as _, Result};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub tree: AcrTree,
    /// Anomalies absorbed during the run, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl PipelineOutput {
    /// The tree in the shape the code generator consumes.
    pub fn export(&self) -> Vec<ExportedPrimitive> {
        self.tree.export()
    }

    /// Exported tree as pretty-printed JSON.
    ///
    /// # Errors
    /// Fails only if serialisation fails, e.g. on non-finite coordinates.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.export()).context("failed to serialise inferred tree")
    }
}
