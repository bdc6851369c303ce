//! Immutable vertex/edge graph with adjacency lookup.
//!
//! A [`GraphModel`] is built once from plain point and edge arrays and is
//! never mutated afterwards. Adjacency lists hold incident edge indices in
//! ascending order, so every traversal over the model is deterministic.

use crate::error::GraphError;
use crate::geometry::Point;
use std::collections::VecDeque;

/// Index of a vertex, assigned by the source mesh.
pub type VertexId = usize;
/// Index of an edge, assigned by the source mesh.
pub type EdgeId = usize;

/// An undirected edge between two distinct vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub a: VertexId,
    pub b: VertexId,
}

impl Edge {
    /// The endpoint opposite `vertex`, if `vertex` is on this edge
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if self.a == vertex {
            Some(self.b)
        } else if self.b == vertex {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn touches(&self, vertex: VertexId) -> bool {
        self.a == vertex || self.b == vertex
    }
}

/// Immutable view over a wireframe: points, edges and adjacency.
#[derive(Debug, Clone)]
pub struct GraphModel {
    points: Vec<Point>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeId>>,
}

impl GraphModel {
    /// Build a graph from points and vertex-index pairs.
    ///
    /// Edge `i` of `edges` gets edge index `i`. Parallel edges are kept as
    /// given; self-loops and out-of-range indices are rejected.
    pub fn new(points: Vec<Point>, edges: &[[VertexId; 2]]) -> Result<Self, GraphError> {
        let vertex_count = points.len();
        let mut adjacency = vec![Vec::new(); vertex_count];
        let mut built = Vec::with_capacity(edges.len());

        for (id, &[a, b]) in edges.iter().enumerate() {
            for vertex in [a, b] {
                if vertex >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        edge: id,
                        vertex,
                        vertex_count,
                    });
                }
            }
            if a == b {
                return Err(GraphError::SelfLoop { edge: id, vertex: a });
            }
            adjacency[a].push(id);
            adjacency[b].push(id);
            built.push(Edge { id, a, b });
        }

        Ok(Self {
            points,
            edges: built,
            adjacency,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Whether `vertex` is a valid vertex index
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex < self.points.len()
    }

    /// Position of a vertex
    pub fn point_of(&self, vertex: VertexId) -> Result<&Point, GraphError> {
        self.points
            .get(vertex)
            .ok_or(GraphError::UnknownVertex {
                vertex,
                vertex_count: self.points.len(),
            })
    }

    /// Edge lookup by index
    pub fn edge(&self, edge: EdgeId) -> Result<&Edge, GraphError> {
        self.edges.get(edge).ok_or(GraphError::EdgeOutOfRange {
            edge,
            edge_count: self.edges.len(),
        })
    }

    /// Incident edge indices of a vertex, ascending
    pub fn incident_edges(&self, vertex: VertexId) -> Result<&[EdgeId], GraphError> {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or(GraphError::UnknownVertex {
                vertex,
                vertex_count: self.points.len(),
            })
    }

    /// Number of incident edges of a vertex
    pub fn degree(&self, vertex: VertexId) -> Result<usize, GraphError> {
        self.incident_edges(vertex).map(<[EdgeId]>::len)
    }

    /// The endpoint of `edge` opposite to `vertex`
    pub fn other_endpoint(&self, edge: EdgeId, vertex: VertexId) -> Result<VertexId, GraphError> {
        self.edge(edge)?
            .other(vertex)
            .ok_or(GraphError::NotIncident { edge, vertex })
    }

    /// Number of edges in the connected component containing `vertex`
    pub fn component_edge_count(&self, vertex: VertexId) -> Result<usize, GraphError> {
        self.incident_edges(vertex)?;

        let mut seen_vertex = vec![false; self.points.len()];
        let mut seen_edge = vec![false; self.edges.len()];
        let mut queue = VecDeque::from([vertex]);
        let mut count = 0;
        seen_vertex[vertex] = true;

        while let Some(current) = queue.pop_front() {
            for &edge in &self.adjacency[current] {
                if seen_edge[edge] {
                    continue;
                }
                seen_edge[edge] = true;
                count += 1;
                let next = self.edges[edge].other(current).unwrap_or(current);
                if !seen_vertex[next] {
                    seen_vertex[next] = true;
                    queue.push_back(next);
                }
            }
        }

        Ok(count)
    }
}
