//! Inference pipeline orchestration.
//!
//! Drives the stages over an ACR tree in post-order (children first). At each
//! level the siblings are nested into rows, sorted top-to-bottom and
//! classified; then, unless deferred, compound primitives are matched and
//! rows receive their grid cells. Structural errors either abort the run or
//! skip the offending subtree, depending on the configured policy.

mod deferred;
mod options;
mod output;
mod pipeline;

pub use deferred::{apportion_tree, match_compounds_tree};
pub use options::PipelineOptions;
pub use output::PipelineOutput;
pub use pipeline::Pipeline;

pub use acr_model::{
    AcrTree, Diagnostic, ErrorPolicy, InferenceConfig, InferenceError, Kind, NodeId,
    PipelineContext,
};

/// Run the default pipeline over detector JSON.
///
/// # Errors
/// Fails on malformed input or on a structural error under the abort policy.
pub fn infer_json(json: &str, config: InferenceConfig) -> anyhow::Result<PipelineOutput> {
    Pipeline::new(config).run_json(json)
}
