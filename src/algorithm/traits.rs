use std::fmt::Debug;
use num_traits::{Float, Zero};
use crate::graph::{Graph, Path, VertexId};
use crate::{Error, Result};

/// Trait for single-pair shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Computes a shortest path from `source` to `sink`.
    ///
    /// Returns `Ok(None)` when the pair is disconnected, including when either
    /// end is currently soft-removed. Fails with [`Error::InvalidVertex`] for IDs
    /// the graph has never seen.
    fn shortest_path(&mut self, graph: &G, source: VertexId, sink: VertexId) -> Result<Option<Path<W>>>;
}

/// Rejects IDs the graph has never registered, removed or not
pub(crate) fn ensure_known<W, G>(graph: &G, ids: &[VertexId]) -> Result<()>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    match ids.iter().find(|&&id| !graph.contains_vertex(id)) {
        Some(&id) => Err(Error::InvalidVertex(id)),
        None => Ok(()),
    }
}
