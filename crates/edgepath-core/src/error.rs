//! Error handling for edgepath
//!
//! Provides error types for the data layer:
//! - Graph errors (malformed wireframes, bad vertex/edge references)
//! - Input errors (wireframe files that cannot be read or parsed)
//! - Selection errors (no unique start vertex)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::graph::{EdgeId, VertexId};
use thiserror::Error;

/// Graph construction and lookup error type
///
/// Raised when a wireframe violates the graph invariants: every edge
/// must join two distinct, existing vertices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge references a vertex index that does not exist
    #[error("Edge {edge} references vertex {vertex}, but only {vertex_count} vertices exist")]
    VertexOutOfRange {
        /// The offending edge.
        edge: EdgeId,
        /// The missing vertex index.
        vertex: VertexId,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },

    /// An edge joins a vertex to itself
    #[error("Edge {edge} is a self-loop on vertex {vertex}")]
    SelfLoop {
        /// The offending edge.
        edge: EdgeId,
        /// The vertex on both ends.
        vertex: VertexId,
    },

    /// A vertex index used for lookup or as a start vertex does not exist
    #[error("Vertex {vertex} does not exist (vertex count {vertex_count})")]
    UnknownVertex {
        /// The missing vertex index.
        vertex: VertexId,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },

    /// An edge index used for lookup does not exist
    #[error("Edge {edge} does not exist (edge count {edge_count})")]
    EdgeOutOfRange {
        /// The missing edge index.
        edge: EdgeId,
        /// Number of edges in the graph.
        edge_count: usize,
    },

    /// The edge does not touch the given vertex
    #[error("Edge {edge} is not incident to vertex {vertex}")]
    NotIncident {
        /// The edge that was queried.
        edge: EdgeId,
        /// The vertex that is not one of its endpoints.
        vertex: VertexId,
    },
}

/// Main error type for edgepath-core
///
/// Unifies graph errors with wireframe loading failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Graph error
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Wavefront OBJ parse error
    #[error("OBJ parse error at line {line}: {reason}")]
    ObjParse {
        /// 1-based line number in the source file.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The wireframe file extension is not recognised
    #[error("Unsupported wireframe format: {0}")]
    UnsupportedFormat(String),

    /// No unique start vertex could be determined
    #[error("Please select exactly one vertex before exporting ({selected} selected)")]
    StartSelection {
        /// How many vertices were selected.
        selected: usize,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is a graph error
    pub fn is_graph_error(&self) -> bool {
        matches!(self, Error::Graph(_))
    }

    /// Check if this error came from reading or parsing input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::ObjParse { .. } | Error::UnsupportedFormat(_) | Error::Io(_) | Error::Json(_)
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
