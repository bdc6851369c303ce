//! Polyline merging for edge sets without a designated start.
//!
//! Every edge starts out as its own two-vertex chain. Chains sharing an
//! endpoint are spliced together one pair at a time, reversing one side
//! when needed, and the scan restarts from the beginning after each
//! splice. The loop ends when no two chains share an endpoint.
//!
//! The rescan is cubic in the edge count. Which chain absorbs which, and
//! the output order, follow from the scan order and carry no meaning.

use edgepath_core::{Edge, GraphModel, VertexId};
use tracing::debug;

/// Ordered vertex sequence; closed when its first and last vertex coincide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolylineChain {
    vertices: Vec<VertexId>,
}

impl PolylineChain {
    /// Chain over an explicit vertex sequence; `None` when it is empty
    pub fn new(vertices: Vec<VertexId>) -> Option<Self> {
        (!vertices.is_empty()).then_some(Self { vertices })
    }

    pub fn from_edge(a: VertexId, b: VertexId) -> Self {
        Self {
            vertices: vec![a, b],
        }
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn first(&self) -> VertexId {
        self.vertices[0]
    }

    pub fn last(&self) -> VertexId {
        self.vertices[self.vertices.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of edges this chain covers
    pub fn edge_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn is_closed(&self) -> bool {
        self.vertices.len() > 1 && self.first() == self.last()
    }

    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// Whether an endpoint of `self` equals an endpoint of `other`
    pub fn shares_endpoint(&self, other: &Self) -> bool {
        self.first() == other.first()
            || self.first() == other.last()
            || self.last() == other.first()
            || self.last() == other.last()
    }

    /// Splice `other` onto this chain through a shared endpoint.
    ///
    /// `other` is reversed when both chains start or both end on the shared
    /// vertex. Returns `other` unchanged if no endpoint is shared.
    pub fn absorb(&mut self, other: Self) -> Result<(), Self> {
        if !self.shares_endpoint(&other) {
            return Err(other);
        }
        self.splice(other);
        Ok(())
    }

    fn splice(&mut self, mut other: Self) {
        if self.first() == other.first() || self.last() == other.last() {
            other.reverse();
        }

        if self.first() == other.last() {
            other.vertices.pop();
            other.vertices.append(&mut self.vertices);
            self.vertices = other.vertices;
        } else {
            self.vertices.pop();
            self.vertices.append(&mut other.vertices);
        }
    }
}

/// Coalesces unordered edges into maximal chains
#[derive(Debug)]
pub struct PolylineMerger;

impl PolylineMerger {
    /// Merge all edges of a graph
    pub fn merge_graph(graph: &GraphModel) -> Vec<PolylineChain> {
        Self::merge(graph.edges())
    }

    /// Merge edges, one initial chain per edge in edge order
    pub fn merge(edges: &[Edge]) -> Vec<PolylineChain> {
        let chains = edges
            .iter()
            .map(|e| PolylineChain::from_edge(e.a, e.b))
            .collect();
        Self::merge_chains(chains)
    }

    /// Merge existing chains until no pair shares an endpoint
    pub fn merge_chains(mut chains: Vec<PolylineChain>) -> Vec<PolylineChain> {
        let initial = chains.len();

        while let Some((i, j)) = Self::find_mergeable(&chains) {
            let other = chains.remove(j);
            chains[i].splice(other);
        }

        debug!(
            initial,
            merged = chains.len(),
            closed = chains.iter().filter(|c| c.is_closed()).count(),
            "Polyline merge complete"
        );
        chains
    }

    /// First pair `(i, j)`, `i < j`, in scan order that shares an endpoint
    fn find_mergeable(chains: &[PolylineChain]) -> Option<(usize, usize)> {
        (0..chains.len()).find_map(|i| {
            (i + 1..chains.len())
                .find(|&j| chains[i].shares_endpoint(&chains[j]))
                .map(|j| (i, j))
        })
    }
}
