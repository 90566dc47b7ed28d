use std::collections::HashSet;
use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::algorithm::traits::{ensure_known, ShortestPathAlgorithm};
use crate::graph::{Graph, Path, VertexId};
use crate::Result;

/// Enumerates every loopless path by depth-first search.
///
/// Exponential in general; meant as a reference for small graphs.
#[derive(Debug, Default, Clone)]
pub struct ExhaustiveSearch;

impl ExhaustiveSearch {
    pub fn new() -> Self {
        ExhaustiveSearch
    }

    /// All loopless `source -> sink` paths, ordered by weight then vertex sequence
    pub fn all_loopless_paths<W, G>(&self, graph: &G, source: VertexId, sink: VertexId) -> Result<Vec<Path<W>>>
    where
        W: Float + Zero + Debug + Copy + Ord,
        G: Graph<W>,
    {
        ensure_known(graph, &[source, sink])?;
        let mut paths = Vec::new();
        if !graph.has_vertex(source) || !graph.has_vertex(sink) {
            return Ok(paths);
        }

        let mut stack = vec![source];
        let mut on_stack = HashSet::from([source]);
        Self::extend(graph, sink, W::zero(), &mut stack, &mut on_stack, &mut paths);

        paths.sort_by(|a, b| {
            a.weight()
                .cmp(&b.weight())
                .then_with(|| a.vertices().cmp(b.vertices()))
        });
        Ok(paths)
    }

    fn extend<W, G>(
        graph: &G,
        sink: VertexId,
        weight: W,
        stack: &mut Vec<VertexId>,
        on_stack: &mut HashSet<VertexId>,
        paths: &mut Vec<Path<W>>,
    ) where
        W: Float + Zero + Debug + Copy + Ord,
        G: Graph<W>,
    {
        let Some(&current) = stack.last() else {
            return;
        };
        if current == sink {
            paths.push(Path::new(stack.clone(), weight));
            return;
        }

        let successors: Vec<VertexId> = graph.successors(current).collect();
        for next in successors {
            if on_stack.contains(&next) {
                continue;
            }
            let Some(step) = graph.edge_weight(current, next) else {
                continue;
            };
            stack.push(next);
            on_stack.insert(next);
            Self::extend(graph, sink, weight + step, stack, on_stack, paths);
            on_stack.remove(&next);
            stack.pop();
        }
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for ExhaustiveSearch
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Exhaustive"
    }

    fn shortest_path(&mut self, graph: &G, source: VertexId, sink: VertexId) -> Result<Option<Path<W>>> {
        Ok(self.all_loopless_paths(graph, source, sink)?.into_iter().next())
    }
}
