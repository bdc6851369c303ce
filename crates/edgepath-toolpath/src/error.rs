//! Error types for the toolpath crate.
//!
//! This module provides structured error types for chain walking and for
//! the G-code and SVG writers.

use edgepath_core::{GraphError, VertexId};
use thiserror::Error;

/// Errors that stop a chain walk.
///
/// `DeadEnd` and `Ambiguous` together are the "ambiguous or exhausted"
/// path failures: at `vertex` the number of continuation edges was not
/// exactly one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// The graph or the start vertex is malformed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// No continuation edge while edges of the start component remain.
    #[error("At vertex [{vertex}] no unique path could be found: dead end after {visited} of {component_edges} edges")]
    DeadEnd {
        vertex: VertexId,
        visited: usize,
        component_edges: usize,
    },

    /// More than one continuation edge.
    #[error("At vertex [{vertex}] no unique path could be found: {candidates} candidate edges")]
    Ambiguous { vertex: VertexId, candidates: usize },

    /// The caller's step ceiling was reached before the walk ended.
    #[error("Walk exceeded the step limit of {limit}")]
    StepLimit { limit: usize },
}

impl WalkError {
    /// Vertex at which the walk failed, for path failures
    pub fn vertex(&self) -> Option<VertexId> {
        match self {
            Self::DeadEnd { vertex, .. } | Self::Ambiguous { vertex, .. } => Some(*vertex),
            _ => None,
        }
    }

    /// Remaining candidate edge count at the failing vertex
    pub fn candidate_count(&self) -> Option<usize> {
        match self {
            Self::DeadEnd { .. } => Some(0),
            Self::Ambiguous { candidates, .. } => Some(*candidates),
            _ => None,
        }
    }

    /// Whether this is a topology failure rather than bad input indices
    pub fn is_ambiguous_or_exhausted(&self) -> bool {
        matches!(self, Self::DeadEnd { .. } | Self::Ambiguous { .. })
    }
}

/// Errors that can occur while exporting a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The chain walk failed.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// A graph lookup failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A merged polyline does not close on itself.
    #[error("Object {object}: non-closing polyline from vertex {first} to vertex {last}")]
    OpenPolyline {
        object: String,
        first: VertexId,
        last: VertexId,
    },
}

/// Result type alias for chain walks.
pub type WalkResult<T> = Result<T, WalkError>;

/// Result type alias for exports.
pub type ExportResult<T> = Result<T, ExportError>;
