//! Abstract Component Representation (ACR).
//!
//! The ACR is a typed tree of UI-component candidates. Nodes live in an
//! arena ([`AcrTree`]) keyed by [`NodeId`]; each node owns the ordered list
//! of its children's ids and keeps its parent only as a plain id, so a node
//! can never be owned by two parents and cycle checks are an O(depth) walk.
//!
//! This crate also carries the pieces every inference stage shares: the
//! configuration, the per-run [`PipelineContext`], the error taxonomy and
//! the detector input / code-generation output contracts.

mod config;
pub use config::{ErrorPolicy, InferenceConfig};

mod context;
pub use context::{IdGenerator, PipelineContext};

mod error;
pub use error::{Diagnostic, InferenceError};

mod id;
pub use id::NodeId;

pub mod io;

mod kind;
pub use kind::Kind;

mod primitive;
pub use primitive::{GridCell, Primitive};

mod tree;
pub use tree::AcrTree;

/// Convenience result alias for tree and inference operations.
pub type InferenceResult<T> = Result<T, InferenceError>;
