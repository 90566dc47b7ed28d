use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::algorithm::traits::{ensure_known, ShortestPathAlgorithm};
use crate::data_structures::IndexedPriorityQueue;
use crate::graph::{Graph, Path, VertexId};
use crate::{Error, Result};

/// Dijkstra's algorithm with reusable search state.
///
/// The engine owns the tentative distances, predecessors, settled set and
/// frontier of its last search; the graph is borrowed per call so that a caller
/// may mutate it (soft removal) between a tree build and its repairs.
///
/// After [`Dijkstra::reverse_flower`], distances are measured *to* the root and
/// the "predecessor" of a vertex is its next hop towards the root.
#[derive(Debug, Clone)]
pub struct Dijkstra<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    distances: HashMap<VertexId, W>,
    predecessors: HashMap<VertexId, VertexId>,
    settled: HashSet<VertexId>,
    frontier: IndexedPriorityQueue<VertexId, W>,
    root: Option<VertexId>,
}

impl<W> Default for Dijkstra<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Dijkstra<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra {
            distances: HashMap::new(),
            predecessors: HashMap::new(),
            settled: HashSet::new(),
            frontier: IndexedPriorityQueue::new(),
            root: None,
        }
    }

    /// Forgets the state of the previous search
    pub fn clear(&mut self) {
        self.distances.clear();
        self.predecessors.clear();
        self.settled.clear();
        self.frontier.clear();
        self.root = None;
    }

    /// One-shot forward search from `source` that stops once `sink` is popped.
    ///
    /// Returns `Ok(None)` when `sink` is unreachable or either end is
    /// soft-removed.
    pub fn query<G>(&mut self, graph: &G, source: VertexId, sink: VertexId) -> Result<Option<Path<W>>>
    where
        G: Graph<W>,
    {
        ensure_known(graph, &[source, sink])?;
        if !graph.has_vertex(source) || !graph.has_vertex(sink) {
            self.clear();
            return Ok(None);
        }

        self.determine(graph, source, Some(sink), true);

        let Some(&weight) = self.distances.get(&sink) else {
            log::debug!("no path from {} to {}", source, sink);
            return Ok(None);
        };

        let mut vertices = vec![sink];
        let mut current = sink;
        while current != source {
            let previous = *self
                .predecessors
                .get(&current)
                .ok_or(Error::BrokenPath { vertex: current })?;
            vertices.push(previous);
            current = previous;

            if vertices.len() > self.distances.len() {
                return Err(Error::BrokenPath { vertex: current });
            }
        }
        vertices.reverse();

        log::debug!(
            "shortest path {} -> {} has {} vertices, weight {:?} ({} settled)",
            source,
            sink,
            vertices.len(),
            weight,
            self.settled.len()
        );
        Ok(Some(Path::new(vertices, weight)))
    }

    /// Builds the complete reverse shortest-path tree rooted at `root`.
    ///
    /// The search follows fan-in edges, so each distance is the cost of the
    /// best path from that vertex to `root` in the current graph.
    pub fn reverse_flower<G>(&mut self, graph: &G, root: VertexId)
    where
        G: Graph<W>,
    {
        self.determine(graph, root, None, false);
        self.root = Some(root);
        log::debug!(
            "reverse tree at {} reaches {} vertices",
            root,
            self.distances.len()
        );
    }

    /// Tries to improve the distance of `vertex` through its live successors.
    ///
    /// Only successors already holding a distance are considered. On a strict
    /// improvement the distance and predecessor of `vertex` are updated and the
    /// path from `vertex` along the predecessor chain is returned.
    pub fn repair_forward<G>(&mut self, graph: &G, vertex: VertexId) -> Option<Path<W>>
    where
        G: Graph<W>,
    {
        let mut best = self.distances.get(&vertex).copied();
        let mut improvement = None;

        for successor in graph.successors(vertex) {
            let Some(&successor_distance) = self.distances.get(&successor) else {
                continue;
            };
            let Some(weight) = graph.edge_weight(vertex, successor) else {
                continue;
            };
            let candidate = successor_distance + weight;
            if best.map_or(true, |current| current > candidate) {
                best = Some(candidate);
                improvement = Some((successor, candidate));
            }
        }

        let (successor, cost) = improvement?;
        self.distances.insert(vertex, cost);
        self.predecessors.insert(vertex, successor);

        self.chain_from(vertex).map(|vertices| Path::new(vertices, cost))
    }

    /// Propagates an improved distance at `vertex` to its predecessors.
    ///
    /// Every predecessor whose route through the improved vertex is now cheaper
    /// is updated and queued in turn, until nothing changes.
    pub fn repair_backward<G>(&mut self, graph: &G, vertex: VertexId)
    where
        G: Graph<W>,
    {
        let mut worklist = VecDeque::from([vertex]);

        while let Some(current) = worklist.pop_front() {
            let Some(&current_distance) = self.distances.get(&current) else {
                continue;
            };

            for previous in graph.predecessors(current) {
                let Some(weight) = graph.edge_weight(previous, current) else {
                    continue;
                };
                let fresh = current_distance + weight;
                let improves = self
                    .distances
                    .get(&previous)
                    .map_or(true, |&known| known > fresh);
                if improves {
                    self.distances.insert(previous, fresh);
                    self.predecessors.insert(previous, current);
                    worklist.push_back(previous);
                }
            }
        }
    }

    /// Best known distance of `vertex`, `None` if it was never reached
    pub fn distance(&self, vertex: VertexId) -> Option<W> {
        self.distances.get(&vertex).copied()
    }

    pub fn set_distance(&mut self, vertex: VertexId, distance: W) {
        self.distances.insert(vertex, distance);
    }

    pub fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.predecessors.get(&vertex).copied()
    }

    pub fn set_predecessor(&mut self, vertex: VertexId, predecessor: VertexId) {
        self.predecessors.insert(vertex, predecessor);
    }

    /// Root of the last search
    pub fn root(&self) -> Option<VertexId> {
        self.root
    }

    /// Number of vertices finalised by the last search
    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    /// All known distances of the current tree
    pub fn distances(&self) -> impl Iterator<Item = (VertexId, W)> + '_ {
        self.distances.iter().map(|(&v, &d)| (v, d))
    }

    fn determine<G>(&mut self, graph: &G, start: VertexId, stop: Option<VertexId>, forward: bool)
    where
        G: Graph<W>,
    {
        self.clear();
        self.root = Some(start);
        self.distances.insert(start, W::zero());
        self.frontier.push_or_update(start, W::zero());

        while let Some((current, distance)) = self.frontier.pop() {
            if Some(current) == stop {
                break;
            }
            self.settled.insert(current);
            self.relax(graph, current, distance, forward);
        }
    }

    fn relax<G>(&mut self, graph: &G, current: VertexId, distance: W, forward: bool)
    where
        G: Graph<W>,
    {
        let neighbours = if forward {
            graph.successors(current)
        } else {
            graph.predecessors(current)
        };

        for neighbour in neighbours {
            if self.settled.contains(&neighbour) {
                continue;
            }
            let weight = if forward {
                graph.edge_weight(current, neighbour)
            } else {
                graph.edge_weight(neighbour, current)
            };
            let Some(weight) = weight else {
                continue;
            };

            let candidate = distance + weight;
            let improves = self
                .distances
                .get(&neighbour)
                .map_or(true, |&known| known > candidate);
            if improves {
                self.distances.insert(neighbour, candidate);
                self.predecessors.insert(neighbour, current);
                self.frontier.push_or_update(neighbour, candidate);
            }
        }
    }

    fn chain_from(&self, vertex: VertexId) -> Option<Vec<VertexId>> {
        let mut vertices = vec![vertex];
        let mut seen = HashSet::from([vertex]);
        let mut current = vertex;

        while let Some(&next) = self.predecessors.get(&current) {
            if !seen.insert(next) {
                log::warn!("cyclic predecessor chain at vertex {}", next);
                return None;
            }
            vertices.push(next);
            current = next;
        }

        Some(vertices)
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra<W>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn shortest_path(&mut self, graph: &G, source: VertexId, sink: VertexId) -> Result<Option<Path<W>>> {
        self.query(graph, source, sink)
    }
}
