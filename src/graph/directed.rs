use crate::graph::path::{Vertex, VertexId};
use crate::graph::traits::{Graph, SoftRemoval};
use crate::{Error, FormatError, Result};
use num_traits::{Float, Zero};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Debug;

/// Directed edge key built from the arena slots of its endpoints.
///
/// The encoding packs both 32-bit slots into one word, so it stays a bijection
/// no matter how many vertices are created afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeCode(u64);

impl EdgeCode {
    fn new(from_slot: usize, to_slot: usize) -> Self {
        EdgeCode(((from_slot as u64) << 32) | to_slot as u64)
    }

    /// Arena slots of the source and sink
    pub fn slots(self) -> (usize, usize) {
        ((self.0 >> 32) as usize, (self.0 & 0xFFFF_FFFF) as usize)
    }
}

/// A directed graph with reversible ("soft") removal of vertices and edges.
///
/// Vertices live in an arena indexed by slot; the caller's [`VertexId`] is
/// mapped to its slot on first reference. Adjacency is kept as ordered slot
/// sets so traversal order is deterministic for a given input.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Vertex arena in creation order
    vertices: Vec<Vertex>,

    /// Caller ID -> arena slot
    slots: HashMap<VertexId, usize>,

    /// Fan-out per slot
    fan_out: Vec<BTreeSet<usize>>,

    /// Fan-in per slot
    fan_in: Vec<BTreeSet<usize>>,

    weights: HashMap<EdgeCode, W>,

    removed_vertices: HashSet<VertexId>,

    removed_edges: HashSet<(VertexId, VertexId)>,
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            vertices: Vec::new(),
            slots: HashMap::new(),
            fan_out: Vec::new(),
            fan_in: Vec::new(),
            weights: HashMap::new(),
            removed_vertices: HashSet::new(),
            removed_edges: HashSet::new(),
        }
    }

    /// Creates a new directed graph holding the isolated vertices `0..vertices`
    pub fn with_capacity(vertices: usize) -> Self {
        let mut graph = DirectedGraph {
            vertices: Vec::with_capacity(vertices),
            slots: HashMap::with_capacity(vertices),
            fan_out: Vec::with_capacity(vertices),
            fan_in: Vec::with_capacity(vertices),
            weights: HashMap::new(),
            removed_vertices: HashSet::new(),
            removed_edges: HashSet::new(),
        };

        for id in 0..vertices {
            graph.register(id);
        }

        graph
    }

    /// Builds a graph from `(source, sink, weight)` triples.
    ///
    /// A repeated `(source, sink)` pair overwrites the earlier weight. Fails if
    /// the number of distinct vertices differs from `declared_vertices`.
    pub fn from_edges<I>(declared_vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VertexId, VertexId, W)>,
    {
        let mut graph = DirectedGraph::new();
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }

        if graph.vertex_count() != declared_vertices {
            log::warn!(
                "graph declares {} vertices but its edges reference {}",
                declared_vertices,
                graph.vertex_count()
            );
            return Err(FormatError::VertexCountMismatch {
                declared: declared_vertices,
                found: graph.vertex_count(),
            }
            .into());
        }

        log::debug!(
            "built graph with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Adds or overwrites the edge `from -> to`, creating missing endpoints.
    ///
    /// Returns `true` if the edge is new and `false` if an existing weight was
    /// replaced. Infinite weights are rejected along with negative ones, since
    /// infinity stands for "disconnected".
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: W) -> Result<bool> {
        if !weight.is_finite() || weight < W::zero() {
            return Err(Error::InvalidWeight(weight.to_f64().unwrap_or(f64::NAN)));
        }

        let from_slot = self.register(from);
        let to_slot = self.register(to);

        self.fan_out[from_slot].insert(to_slot);
        self.fan_in[to_slot].insert(from_slot);

        Ok(self
            .weights
            .insert(EdgeCode::new(from_slot, to_slot), weight)
            .is_none())
    }

    /// Returns the vertex for `id`, creating it if unseen.
    ///
    /// Returns `None` while `id` is soft-removed.
    pub fn vertex(&mut self, id: VertexId) -> Option<&Vertex> {
        if self.removed_vertices.contains(&id) {
            return None;
        }
        let slot = self.register(id);
        self.vertices.get(slot)
    }

    /// Looks up a live vertex without creating it
    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        if self.removed_vertices.contains(&id) {
            return None;
        }
        self.slots.get(&id).map(|&slot| &self.vertices[slot])
    }

    /// Vertex IDs in creation order, removed ones included
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(Vertex::id)
    }

    /// Every configured edge as `(source, sink, weight)`, ignoring soft removal
    pub fn edges(&self) -> Vec<(VertexId, VertexId, W)> {
        let mut edges = Vec::with_capacity(self.weights.len());
        for (from_slot, targets) in self.fan_out.iter().enumerate() {
            for &to_slot in targets {
                if let Some(&weight) = self.weights.get(&EdgeCode::new(from_slot, to_slot)) {
                    edges.push((
                        self.vertices[from_slot].id(),
                        self.vertices[to_slot].id(),
                        weight,
                    ));
                }
            }
        }
        edges
    }

    /// Edge code of `from -> to`, if both endpoints are known
    pub fn edge_code(&self, from: VertexId, to: VertexId) -> Option<EdgeCode> {
        let from_slot = *self.slots.get(&from)?;
        let to_slot = *self.slots.get(&to)?;
        Some(EdgeCode::new(from_slot, to_slot))
    }

    fn register(&mut self, id: VertexId) -> usize {
        if let Some(&slot) = self.slots.get(&id) {
            return slot;
        }

        let slot = self.vertices.len();
        self.vertices.push(Vertex::new(id));
        self.fan_out.push(BTreeSet::new());
        self.fan_in.push(BTreeSet::new());
        self.slots.insert(id, slot);
        slot
    }

    fn live_neighbours<'a>(
        &'a self,
        vertex: VertexId,
        adjacency: &'a [BTreeSet<usize>],
        outgoing: bool,
    ) -> Box<dyn Iterator<Item = VertexId> + 'a> {
        if self.removed_vertices.contains(&vertex) {
            return Box::new(std::iter::empty());
        }
        let Some(&slot) = self.slots.get(&vertex) else {
            return Box::new(std::iter::empty());
        };

        Box::new(
            adjacency[slot]
                .iter()
                .map(move |&other| self.vertices[other].id())
                .filter(move |&other| {
                    let edge = if outgoing { (vertex, other) } else { (other, vertex) };
                    !self.removed_vertices.contains(&other) && !self.removed_edges.contains(&edge)
                }),
        )
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.weights.len()
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.slots.contains_key(&vertex)
    }

    fn has_vertex(&self, vertex: VertexId) -> bool {
        self.slots.contains_key(&vertex) && !self.removed_vertices.contains(&vertex)
    }

    fn successors(&self, vertex: VertexId) -> Box<dyn Iterator<Item = VertexId> + '_> {
        self.live_neighbours(vertex, &self.fan_out, true)
    }

    fn predecessors(&self, vertex: VertexId) -> Box<dyn Iterator<Item = VertexId> + '_> {
        self.live_neighbours(vertex, &self.fan_in, false)
    }

    fn edge_weight(&self, from: VertexId, to: VertexId) -> Option<W> {
        if self.removed_vertices.contains(&from)
            || self.removed_vertices.contains(&to)
            || self.removed_edges.contains(&(from, to))
        {
            return None;
        }
        self.original_edge_weight(from, to)
    }

    fn original_edge_weight(&self, from: VertexId, to: VertexId) -> Option<W> {
        let code = self.edge_code(from, to)?;
        self.weights.get(&code).copied()
    }
}

impl<W> SoftRemoval for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        self.removed_edges.insert((from, to))
    }

    fn remove_vertex(&mut self, vertex: VertexId) -> bool {
        self.removed_vertices.insert(vertex)
    }

    fn recover_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        self.removed_edges.remove(&(from, to))
    }

    fn recover_vertex(&mut self, vertex: VertexId) -> bool {
        self.removed_vertices.remove(&vertex)
    }

    fn recover_all_edges(&mut self) {
        self.removed_edges.clear();
    }

    fn recover_all_vertices(&mut self) {
        self.removed_vertices.clear();
    }

    fn is_vertex_removed(&self, vertex: VertexId) -> bool {
        self.removed_vertices.contains(&vertex)
    }

    fn is_edge_removed(&self, from: VertexId, to: VertexId) -> bool {
        self.removed_edges.contains(&(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    fn diamond() -> DirectedGraph<OrderedFloat<f64>> {
        let edges = [(0, 1, 1.0), (0, 2, 4.0), (1, 2, 1.0), (1, 3, 5.0), (2, 3, 1.0)];
        DirectedGraph::from_edges(4, edges.iter().map(|&(u, v, w)| (u, v, OrderedFloat(w))))
            .unwrap()
    }

    #[test]
    fn duplicate_edge_keeps_last_weight() {
        let mut graph: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::new();
        assert!(graph.add_edge(0, 1, OrderedFloat(5.0)).unwrap());
        assert!(!graph.add_edge(0, 1, OrderedFloat(2.0)).unwrap());
        assert_eq!(graph.edge_weight(0, 1), Some(OrderedFloat(2.0)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut graph: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::new();
        assert!(matches!(
            graph.add_edge(0, 1, OrderedFloat(-1.0)),
            Err(Error::InvalidWeight(_))
        ));
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let mut graph: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::new();
        for weight in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(
                graph.add_edge(0, 1, OrderedFloat(weight)),
                Err(Error::InvalidWeight(_))
            ));
        }
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn vertex_count_mismatch_is_a_format_error() {
        let result = DirectedGraph::from_edges(5, vec![(0, 1, OrderedFloat(1.0))]);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::VertexCountMismatch { declared: 5, found: 2 }))
        ));
    }

    #[test]
    fn removed_vertex_hides_incident_edges() {
        let mut graph = diamond();
        graph.remove_vertex(2);

        assert_eq!(graph.edge_weight(1, 2), None);
        assert_eq!(graph.edge_weight(2, 3), None);
        assert_eq!(graph.original_edge_weight(2, 3), Some(OrderedFloat(1.0)));
        assert_eq!(graph.successors(1).collect::<Vec<_>>(), vec![3]);
        assert_eq!(graph.predecessors(3).collect::<Vec<_>>(), vec![1]);
        assert_eq!(graph.successors(2).count(), 0);
        assert!(graph.vertex(2).is_none());
        assert!(graph.get_vertex(2).is_none());
        assert!(graph.contains_vertex(2));
    }

    #[test]
    fn removed_edge_is_directional() {
        let mut graph = diamond();
        graph.remove_edge(0, 1);

        assert_eq!(graph.edge_weight(0, 1), None);
        assert_eq!(graph.successors(0).collect::<Vec<_>>(), vec![2]);
        assert_eq!(graph.predecessors(1).count(), 0);
        assert_eq!(graph.edge_weight(1, 2), Some(OrderedFloat(1.0)));
    }

    #[test]
    fn recovery_is_idempotent() {
        let mut graph = diamond();
        assert!(!graph.recover_vertex(1));
        assert!(!graph.recover_edge(0, 1));

        assert!(graph.remove_vertex(1));
        assert!(!graph.remove_vertex(1));
        assert!(graph.recover_vertex(1));
        assert!(!graph.recover_vertex(1));
        assert!(graph.has_vertex(1));
    }

    #[test]
    fn vertex_creates_unseen_ids() {
        let mut graph = diamond();
        assert_eq!(graph.vertex(10).map(Vertex::id), Some(10));
        assert_eq!(graph.vertex_count(), 5);
        // existing edges keep their codes
        assert_eq!(graph.edge_weight(2, 3), Some(OrderedFloat(1.0)));
    }

    #[test]
    fn edge_code_round_trips_slots() {
        let graph = diamond();
        let code = graph.edge_code(1, 3).unwrap();
        assert_eq!(code.slots(), (1, 3));
        assert!(graph.edge_code(1, 42).is_none());
    }

    #[test]
    fn edges_lists_original_weights() {
        let mut graph = diamond();
        graph.remove_vertex(0);
        let edges = graph.edges();
        assert_eq!(edges.len(), 5);
        assert!(edges.contains(&(0, 2, OrderedFloat(4.0))));
    }
}
