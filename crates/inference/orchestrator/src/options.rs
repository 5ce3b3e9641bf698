use serde::{Deserialize, Serialize};

/// Which optional stages run inline during the post-order traversal.
///
/// Stages switched off here can be run later over the finished tree with
/// [`crate::apportion_tree`] and [`crate::match_compounds_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineOptions {
    /// Assign grid cells to rows at each level.
    pub apportion_grid: bool,
    /// Rewrite compound primitives at each level.
    pub match_compounds: bool,
    /// Remove marker primitives (filtered kinds) once inference is done.
    /// When off they are kept and only marked as not drawable.
    pub remove_markers: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            apportion_grid: true,
            match_compounds: true,
            remove_markers: false,
        }
    }
}

impl PipelineOptions {
    /// Nesting and classification only; grid and compounds are left to the caller.
    pub fn deferred() -> Self {
        Self {
            apportion_grid: false,
            match_compounds: false,
            remove_markers: false,
        }
    }
}
