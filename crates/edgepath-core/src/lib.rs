//! # Edgepath Core
//!
//! Core data model for edgepath: the immutable vertex/edge graph that every
//! path reconstruction works on, the wireframe input it is built from, and
//! the error types shared across the workspace.

pub mod error;
pub mod geometry;
pub mod graph;
pub mod wireframe;

pub use error::{Error, GraphError, Result};
pub use geometry::{round_to, Axis, Bounds2, Point, COORDINATE_DECIMALS};
pub use graph::{Edge, EdgeId, GraphModel, VertexId};
pub use wireframe::Wireframe;
