//! Inference configuration.
//!
//! Tables and thresholds consumed by the inference stages. Configuration is
//! normally supplied as JSON by the host application; every field has a
//! default so partial documents are accepted. A few numeric knobs can be
//! overridden through environment variables.

use anyhow::{Context as _, Result};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::env;

/// What the orchestrator does when a stage reports a structural error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorPolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Record a diagnostic, leave the offending level as it is and continue.
    SkipSubtree,
}

/// Tables and thresholds for one inference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Raw detector label to semantic label.
    pub label_map: BTreeMap<String, String>,
    /// Compound DSL string to compound label.
    pub compound_patterns: BTreeMap<String, String>,
    /// Children below this fraction of their parent's area are fragments.
    pub fragment_area_threshold: f64,
    /// Grid columns per row.
    pub grid_budget: u32,
    /// Margin added on every side of synthetic row boxes.
    pub nesting_padding: f64,
    /// Kinds used only as inference markers; not drawn, removed before code generation.
    pub filtered_kinds: BTreeSet<String>,
    /// Minimum relative width (percent) of a text line inside a header or paragraph.
    pub header_min_relative_width: f64,
    pub error_policy: ErrorPolicy,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        let label_map = [("rectangle", "container")]
            .into_iter()
            .map(|(raw, semantic)| (raw.to_owned(), semantic.to_owned()))
            .collect();
        let compound_patterns = [
            ("container { image; header; paragraph }", "card_image_text"),
            ("container { header; paragraph }", "jumbotron"),
            ("row { image, paragraph }", "media_object"),
        ]
        .into_iter()
        .map(|(pattern, label)| (pattern.to_owned(), label.to_owned()))
        .collect();
        let filtered_kinds = [
            "intersection",
            "centered_intersection",
            "triangle",
            "centered_line",
            "horizontal_line",
            "point",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();

        Self {
            label_map,
            compound_patterns,
            fragment_area_threshold: 0.01,
            grid_budget: 12,
            nesting_padding: 0.0,
            filtered_kinds,
            header_min_relative_width: 33.0,
            error_policy: ErrorPolicy::Abort,
        }
    }
}

impl InferenceConfig {
    /// Parse a JSON configuration document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if the document is not valid JSON or a field has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid inference configuration")
    }

    /// Apply overrides from the environment.
    ///
    /// Reads the following environment variables:
    /// - `ACR_GRID_BUDGET`: grid columns per row
    /// - `ACR_NESTING_PADDING`: synthetic row padding
    /// - `ACR_FRAGMENT_THRESHOLD`: fragment area fraction
    ///
    /// Unset or unparsable variables leave the current value untouched.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(budget) = env_parse::<u32>("ACR_GRID_BUDGET") {
            self.grid_budget = budget;
        }
        if let Some(padding) = env_parse::<f64>("ACR_NESTING_PADDING") {
            self.nesting_padding = padding.max(0.0);
        }
        if let Some(threshold) = env_parse::<f64>("ACR_FRAGMENT_THRESHOLD") {
            self.fragment_area_threshold = threshold;
        }
        self
    }

    /// Semantic label configured for `raw`, if any.
    pub fn semantic_label(&self, raw: &str) -> Option<&str> {
        self.label_map.get(raw).map(String::as_str)
    }

    /// Compound label configured for a serialised subtree, if any.
    pub fn compound_label(&self, serialized: &str) -> Option<&str> {
        self.compound_patterns.get(serialized).map(String::as_str)
    }

    pub fn is_filtered(&self, label: &str) -> bool {
        self.filtered_kinds.contains(label)
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|val| val.trim().parse::<T>().ok())
}
