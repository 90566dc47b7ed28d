use crate::graph::DirectedGraph;
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Generates a random directed graph with `n` vertices and about `edge_factor * n` edges.
///
/// Weights are drawn uniformly from `1.0..max_weight`. Self-loops are skipped and a
/// repeated pair keeps the last drawn weight. The same seed always yields the same graph.
pub fn generate_random(
    n: usize,
    edge_factor: f64,
    max_weight: f64,
    seed: u64,
) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_capacity(n);
    if n < 2 {
        return graph;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let num_edges = (edge_factor * n as f64) as usize;

    for _ in 0..num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            let weight = OrderedFloat(rng.gen_range(1.0..max_weight.max(1.0 + f64::EPSILON)));
            insert_edge(&mut graph, u, v, weight);
        }
    }

    graph
}

/// Generates a random graph with small integral weights, handy for exact weight comparisons
pub fn generate_random_integral(
    n: usize,
    edge_factor: f64,
    max_weight: u32,
    seed: u64,
) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_capacity(n);
    if n < 2 {
        return graph;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let num_edges = (edge_factor * n as f64) as usize;

    for _ in 0..num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            let weight = OrderedFloat(rng.gen_range(1..=max_weight.max(1)) as f64);
            insert_edge(&mut graph, u, v, weight);
        }
    }

    graph
}

/// Generates a `width x height` grid whose edges point right and down.
///
/// Vertex `(x, y)` has ID `y * width + x`. Every monotone corner-to-corner walk is a
/// loopless path, so the grid has many near-equal alternatives for K-paths searches.
pub fn generate_grid(width: usize, height: usize, seed: u64) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_capacity(width * height);
    let mut rng = StdRng::seed_from_u64(seed);

    for y in 0..height {
        for x in 0..width {
            let vertex = y * width + x;
            if x + 1 < width {
                let weight = OrderedFloat(rng.gen_range(1..=9) as f64);
                insert_edge(&mut graph, vertex, vertex + 1, weight);
            }
            if y + 1 < height {
                let weight = OrderedFloat(rng.gen_range(1..=9) as f64);
                insert_edge(&mut graph, vertex, vertex + width, weight);
            }
        }
    }

    graph
}

fn insert_edge(graph: &mut DirectedGraph<OrderedFloat<f64>>, u: usize, v: usize, weight: OrderedFloat<f64>) {
    if let Err(err) = graph.add_edge(u, v, weight) {
        log::warn!("generator dropped edge {} -> {}: {}", u, v, err);
    }
}
