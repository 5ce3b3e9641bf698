use core::fmt;

use crate::id::NodeId;

/// Structural failures that must reach the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Attaching `child` under `parent` would make a node its own ancestor.
    TreeIntegrity { parent: NodeId, child: NodeId },
    /// The floored grid cells of a row already exceed the budget.
    ApportionmentOverflow {
        row: NodeId,
        floor_sum: u32,
        budget: u32,
    },
    UnknownNode(NodeId),
    DuplicateId(NodeId),
    /// A detector id that is neither an integer nor an integer string.
    InvalidId(String),
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TreeIntegrity { parent, child } => write!(
                f,
                "cannot attach {child} under {parent}: {child} is {parent} or one of its ancestors"
            ),
            Self::ApportionmentOverflow {
                row,
                floor_sum,
                budget,
            } => write!(
                f,
                "grid apportionment overflow in row {row}: {floor_sum} floored cells exceed budget {budget}"
            ),
            Self::UnknownNode(id) => write!(f, "no primitive with id {id}"),
            Self::DuplicateId(id) => write!(f, "primitive id {id} is used more than once"),
            Self::InvalidId(raw) => write!(f, "primitive id {raw:?} is not an integer"),
        }
    }
}

impl std::error::Error for InferenceError {}

/// Anomalies absorbed with a safe default; recorded so callers can inspect
/// what the pipeline glossed over.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Fewer than two vertices; treated as zero extent and never grouped.
    DegenerateGeometry { node: NodeId },
    /// A detector label with no semantic mapping; passed through unchanged.
    UnmappedLabel { node: NodeId, label: String },
    /// A subtree left partially processed under the skip-subtree policy.
    SkippedSubtree { node: Option<NodeId>, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateGeometry { node } => {
                write!(f, "{node} has degenerate geometry and was not grouped")
            }
            Self::UnmappedLabel { node, label } => {
                write!(f, "{node} has unmapped label {label:?}")
            }
            Self::SkippedSubtree {
                node: Some(node),
                reason,
            } => write!(f, "skipped subtree at {node}: {reason}"),
            Self::SkippedSubtree { node: None, reason } => {
                write!(f, "skipped top level: {reason}")
            }
        }
    }
}
