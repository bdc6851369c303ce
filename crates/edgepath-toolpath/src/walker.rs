//! Deterministic single-chain walker.
//!
//! Starting from a designated vertex, the walker repeatedly takes the one
//! unvisited edge that continues the path. The input is expected to be a
//! single loop or open path; any other topology is reported at the vertex
//! where it is first detected. Each step is O(degree), a walk is O(E).

use crate::error::{WalkError, WalkResult};
use edgepath_core::{EdgeId, GraphError, GraphModel, VertexId};
use tracing::{debug, warn};

/// One traversed edge, oriented by the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub from: VertexId,
    pub to: VertexId,
    pub edge: EdgeId,
}

/// Edges were left untouched because they are not connected to the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncompleteTraversal {
    pub visited: usize,
    pub total: usize,
}

/// Ordered walk from a start vertex. No edge appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    start: VertexId,
    steps: Vec<Step>,
    total_edges: usize,
}

impl Chain {
    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Vertex where the walk stopped
    pub fn end(&self) -> VertexId {
        self.steps.last().map_or(self.start, |s| s.to)
    }

    /// Visited vertices in order, starting with the start vertex
    pub fn vertices(&self) -> Vec<VertexId> {
        std::iter::once(self.start)
            .chain(self.steps.iter().map(|s| s.to))
            .collect()
    }

    /// Whether the walk returned to its start
    pub fn is_closed(&self) -> bool {
        !self.steps.is_empty() && self.end() == self.start
    }

    /// `Some` when the graph has edges the walk never reached
    pub fn incomplete(&self) -> Option<IncompleteTraversal> {
        (self.steps.len() < self.total_edges).then_some(IncompleteTraversal {
            visited: self.steps.len(),
            total: self.total_edges,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.incomplete().is_none()
    }
}

/// Greedy, no-backtrack walker over a [`GraphModel`].
#[derive(Debug, Clone, Default)]
pub struct ChainWalker {
    step_limit: Option<usize>,
}

impl ChainWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`WalkError::StepLimit`] instead of taking more than `limit` steps
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Walk every edge reachable from `start`.
    ///
    /// The arrival edge and all visited edges are excluded from the
    /// candidates at each vertex. Exactly one candidate is taken. A
    /// degree-2 start has no arrival edge, so the lower edge index picks
    /// the direction around a loop. Zero candidates end the walk, which
    /// succeeds only once the start's component is exhausted.
    pub fn walk(&self, graph: &GraphModel, start: VertexId) -> WalkResult<Chain> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::UnknownVertex {
                vertex: start,
                vertex_count: graph.vertex_count(),
            }
            .into());
        }

        let total = graph.edge_count();
        let mut visited = vec![false; total];
        let mut steps = Vec::with_capacity(total);
        let mut current = start;
        let mut previous: Option<EdgeId> = None;

        debug!(start, edges = total, "Walking chain");

        while steps.len() < total {
            let candidates: Vec<EdgeId> = graph
                .incident_edges(current)?
                .iter()
                .copied()
                .filter(|&e| Some(e) != previous && !visited[e])
                .collect();

            let edge = match (previous, candidates.as_slice()) {
                (_, [edge]) => *edge,
                (_, []) => {
                    let component_edges = graph.component_edge_count(start)?;
                    if steps.len() == component_edges {
                        break;
                    }
                    return Err(WalkError::DeadEnd {
                        vertex: current,
                        visited: steps.len(),
                        component_edges,
                    });
                }
                (None, [first, _]) => {
                    debug!(start, edge = *first, "Start vertex is on a loop, taking lowest edge");
                    *first
                }
                (_, many) => {
                    return Err(WalkError::Ambiguous {
                        vertex: current,
                        candidates: many.len(),
                    })
                }
            };

            if let Some(limit) = self.step_limit {
                if steps.len() >= limit {
                    return Err(WalkError::StepLimit { limit });
                }
            }

            let next = graph.other_endpoint(edge, current)?;
            visited[edge] = true;
            steps.push(Step {
                from: current,
                to: next,
                edge,
            });
            previous = Some(edge);
            current = next;
        }

        let chain = Chain {
            start,
            steps,
            total_edges: total,
        };

        if let Some(gap) = chain.incomplete() {
            warn!(
                start,
                visited = gap.visited,
                total = gap.total,
                "Walk finished without reaching every edge"
            );
        } else {
            debug!(steps = chain.len(), closed = chain.is_closed(), "Walk complete");
        }

        Ok(chain)
    }
}

/// Walk `graph` from `start` with default walker settings
pub fn walk(graph: &GraphModel, start: VertexId) -> WalkResult<Chain> {
    ChainWalker::new().walk(graph, start)
}
