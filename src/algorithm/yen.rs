//! Top-K loopless shortest paths.
//!
//! Yen's deviation scheme drives the search: every emitted path spawns
//! candidates that share a prefix with it and then leave it at a "deviation"
//! vertex. Lawler's refinement bounds the work per emitted path: spur vertices
//! before the path's own deviation vertex were explored when its parent was
//! emitted, and one reverse shortest-path tree rooted at the sink is repaired
//! vertex by vertex instead of rerunning Dijkstra for each spur.

use std::collections::HashMap;
use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::traits::ensure_known;
use crate::data_structures::MinQueue;
use crate::graph::{Graph, Path, SoftRemoval, VertexId};
use crate::Result;

/// Enumerates loopless `source -> sink` paths in non-decreasing weight order.
///
/// The search mutates a private copy of the graph taken at construction; the
/// caller's graph is never touched, so independent searches over one base graph
/// can coexist. `KShortestPaths` is an [`Iterator`] over the emitted paths.
#[derive(Debug)]
pub struct KShortestPaths<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W> + SoftRemoval + Clone,
{
    graph: G,
    source: VertexId,
    sink: VertexId,
    /// Emitted paths, in emission order
    results: Vec<Path<W>>,
    candidates: MinQueue<Path<W>, W>,
    /// Vertex sequence of every path ever queued -> its deviation vertex
    deviations: HashMap<Vec<VertexId>, VertexId>,
    generated: usize,
}

impl<W, G> KShortestPaths<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W> + SoftRemoval + Clone,
{
    /// Prepares a search from `source` to `sink` over a copy of `graph`.
    ///
    /// The copy starts with every soft removal recovered.
    pub fn new(graph: &G, source: VertexId, sink: VertexId) -> Result<Self> {
        ensure_known(graph, &[source, sink])?;

        let mut graph = graph.clone();
        graph.recover_all();

        let mut search = KShortestPaths {
            graph,
            source,
            sink,
            results: Vec::new(),
            candidates: MinQueue::new(),
            deviations: HashMap::new(),
            generated: 0,
        };
        search.initialize()?;
        Ok(search)
    }

    /// Resets the search and seeds the candidate pool with the shortest path
    pub fn initialize(&mut self) -> Result<()> {
        self.clear();

        let shortest = Dijkstra::new().query(&self.graph, self.source, self.sink)?;
        if let Some(path) = shortest.filter(|path| path.len() > 1) {
            log::debug!("seeding search with {}", path.weight().to_f64().unwrap_or(f64::NAN));
            self.deviations.insert(path.vertices().to_vec(), self.source);
            let weight = path.weight();
            self.candidates.push(path, weight);
        }
        Ok(())
    }

    /// True while another path can be emitted
    pub fn has_next(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Single shortest path between any two vertices of the private graph
    pub fn shortest_path(&self, source: VertexId, sink: VertexId) -> Result<Option<Path<W>>> {
        Dijkstra::new().query(&self.graph, source, sink)
    }

    /// Restarts the search for a new pair and returns at most `k` paths
    pub fn k_shortest_paths(&mut self, source: VertexId, sink: VertexId, k: usize) -> Result<Vec<Path<W>>> {
        ensure_known(&self.graph, &[source, sink])?;
        self.source = source;
        self.sink = sink;
        self.initialize()?;

        while self.results.len() < k {
            if self.next().is_none() {
                break;
            }
        }
        Ok(self.results.clone())
    }

    /// Paths emitted so far, in emission order
    pub fn results(&self) -> &[Path<W>] {
        &self.results
    }

    /// The private working graph
    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn sink(&self) -> VertexId {
        self.sink
    }

    /// Number of spur paths found so far, duplicates included
    pub fn generated_count(&self) -> usize {
        self.generated
    }

    fn clear(&mut self) {
        self.results.clear();
        self.candidates.clear();
        self.deviations.clear();
        self.generated = 0;
    }

    /// Emits the cheapest candidate and queues its deviations
    fn emit(&mut self) -> Option<Path<W>> {
        let (path, _) = self.candidates.pop()?;
        let deviation = self
            .deviations
            .get(path.vertices())
            .copied()
            .unwrap_or(self.source);
        self.results.push(path.clone());

        let vertices = path.vertices();
        let last = vertices.len() - 1;
        let prefix = path.sub_path(deviation).unwrap_or(&vertices[..1]);

        // branches already taken at the deviation vertex by earlier results
        let emitted = self.results.len() - 1;
        for earlier in &self.results[..emitted] {
            let shares_prefix = earlier.len() > prefix.len()
                && earlier.vertices()[..prefix.len()] == *prefix;
            if shares_prefix {
                self.graph.remove_edge(deviation, earlier.vertices()[prefix.len()]);
            }
        }

        for (i, &vertex) in vertices[..last].iter().enumerate() {
            self.graph.remove_vertex(vertex);
            self.graph.remove_edge(vertex, vertices[i + 1]);
        }

        let mut tree = Dijkstra::new();
        tree.reverse_flower(&self.graph, self.sink);

        for i in (0..last).rev() {
            let spur = vertices[i];
            self.graph.recover_vertex(spur);

            if let Some(suffix) = tree.repair_forward(&self.graph, spur) {
                self.generated += 1;
                tree.repair_backward(&self.graph, spur);
                self.queue_candidate(vertices, i, suffix, spur);
            }

            let successor = vertices[i + 1];
            self.graph.recover_edge(spur, successor);

            let through_successor = self
                .graph
                .edge_weight(spur, successor)
                .zip(tree.distance(successor))
                .map(|(weight, distance)| weight + distance);
            if let Some(cost) = through_successor {
                if tree.distance(spur).map_or(true, |known| known > cost) {
                    tree.set_distance(spur, cost);
                    tree.set_predecessor(spur, successor);
                    tree.repair_backward(&self.graph, spur);
                }
            }

            if spur == deviation {
                break;
            }
        }

        self.graph.recover_all();
        Some(path)
    }

    /// Joins `vertices[..spur_index]` with `suffix` and queues it if unseen
    fn queue_candidate(&mut self, vertices: &[VertexId], spur_index: usize, suffix: Path<W>, spur: VertexId) {
        let prefix = &vertices[..spur_index];
        let prefix_weight = prefix
            .iter()
            .zip(&vertices[1..=spur_index])
            .filter_map(|(&from, &to)| self.graph.original_edge_weight(from, to))
            .fold(W::zero(), |total, weight| total + weight);

        let mut candidate = prefix.to_vec();
        candidate.extend_from_slice(suffix.vertices());
        let weight = prefix_weight + suffix.weight();

        if self.deviations.contains_key(&candidate) {
            log::trace!("skipping known candidate {:?}", candidate);
            return;
        }

        log::trace!(
            "candidate {:?} deviates at {} with weight {:?}",
            candidate,
            spur,
            weight
        );
        self.deviations.insert(candidate.clone(), spur);
        self.candidates.push(Path::new(candidate, weight), weight);
    }
}

impl<W, G> Iterator for KShortestPaths<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W> + SoftRemoval + Clone,
{
    type Item = Path<W>;

    fn next(&mut self) -> Option<Path<W>> {
        self.emit()
    }
}

/// Shortest path from `source` to `sink`, `Ok(None)` if they are disconnected
pub fn shortest_path<W, G>(graph: &G, source: VertexId, sink: VertexId) -> Result<Option<Path<W>>>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    Dijkstra::new().query(graph, source, sink)
}

/// Up to `k` loopless paths from `source` to `sink` in non-decreasing weight order.
///
/// Fewer than `k` paths are returned when the graph has fewer alternatives.
pub fn k_shortest_paths<W, G>(graph: &G, source: VertexId, sink: VertexId, k: usize) -> Result<Vec<Path<W>>>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W> + SoftRemoval + Clone,
{
    let search = KShortestPaths::new(graph, source, sink)?;
    Ok(search.take(k).collect())
}
