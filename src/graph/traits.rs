use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::graph::path::VertexId;

/// Trait representing a weighted directed graph.
///
/// Every query sees the graph as if soft-removed vertices and edges did not
/// exist. `original_edge_weight` is the only exception.
pub trait Graph<W>: Debug
where
    W: Float + Zero + Debug + Copy,
{
    /// Returns the number of vertices in the graph, removed ones included
    fn vertex_count(&self) -> usize;

    /// Returns the number of distinct edges in the graph, removed ones included
    fn edge_count(&self) -> usize;

    /// Returns true if the vertex was ever registered, soft-removed or not
    fn contains_vertex(&self, vertex: VertexId) -> bool;

    /// Returns true if the vertex exists and is not soft-removed
    fn has_vertex(&self, vertex: VertexId) -> bool;

    /// Returns an iterator over the live successors (fan-out) of a vertex
    fn successors(&self, vertex: VertexId) -> Box<dyn Iterator<Item = VertexId> + '_>;

    /// Returns an iterator over the live predecessors (fan-in) of a vertex
    fn predecessors(&self, vertex: VertexId) -> Box<dyn Iterator<Item = VertexId> + '_>;

    /// Gets the weight of a live edge, `None` when the pair is disconnected
    fn edge_weight(&self, from: VertexId, to: VertexId) -> Option<W>;

    /// Gets the configured weight of an edge, ignoring soft removal
    fn original_edge_weight(&self, from: VertexId, to: VertexId) -> Option<W>;

    /// Returns true if there's a live edge between the two vertices
    fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.edge_weight(from, to).is_some()
    }
}

/// Reversible exclusion of vertices and edges.
///
/// Removal and recovery only toggle membership in the removal sets; the
/// adjacency and weight data are never touched. Every operation is
/// idempotent and reports whether the removal state actually changed.
pub trait SoftRemoval {
    /// Hides the edge `from -> to`
    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> bool;

    /// Hides a vertex together with every edge incident to it
    fn remove_vertex(&mut self, vertex: VertexId) -> bool;

    /// Restores a single hidden edge
    fn recover_edge(&mut self, from: VertexId, to: VertexId) -> bool;

    /// Restores a single hidden vertex
    fn recover_vertex(&mut self, vertex: VertexId) -> bool;

    /// Restores every hidden edge
    fn recover_all_edges(&mut self);

    /// Restores every hidden vertex
    fn recover_all_vertices(&mut self);

    fn is_vertex_removed(&self, vertex: VertexId) -> bool;

    fn is_edge_removed(&self, from: VertexId, to: VertexId) -> bool;

    /// Restores the unmodified graph
    fn recover_all(&mut self) {
        self.recover_all_edges();
        self.recover_all_vertices();
    }
}
