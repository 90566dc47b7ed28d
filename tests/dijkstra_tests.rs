use kpaths::algorithm::dijkstra::Dijkstra;
use kpaths::algorithm::exhaustive::ExhaustiveSearch;
use kpaths::algorithm::traits::ShortestPathAlgorithm;
use kpaths::graph::generators::{generate_grid, generate_random_integral};
use kpaths::graph::{DirectedGraph, Graph, SoftRemoval};
use kpaths::{shortest_path, Error};
use ordered_float::OrderedFloat;

type W = OrderedFloat<f64>;

fn diamond() -> DirectedGraph<W> {
    let edges = [(0, 1, 1.0), (0, 2, 4.0), (1, 2, 1.0), (1, 3, 5.0), (2, 3, 1.0)];
    DirectedGraph::from_edges(4, edges.iter().map(|&(u, v, w)| (u, v, OrderedFloat(w)))).unwrap()
}

fn two_components() -> DirectedGraph<W> {
    let edges = [(0, 1, 1.0), (1, 0, 1.0), (2, 3, 2.0), (3, 2, 2.0)];
    DirectedGraph::from_edges(4, edges.iter().map(|&(u, v, w)| (u, v, OrderedFloat(w)))).unwrap()
}

#[test]
fn test_shortest_path_on_diamond() {
    let graph = diamond();
    let path = shortest_path(&graph, 0, 3).unwrap().unwrap();
    assert_eq!(path.vertices(), &[0, 1, 2, 3]);
    assert_eq!(path.weight(), OrderedFloat(3.0));
    assert_eq!(path.to_string(), "0 -> 1 -> 2 -> 3 (weight 3)");
}

#[test]
fn test_disconnected_pair_is_not_an_error() {
    let graph = two_components();
    assert!(shortest_path(&graph, 0, 3).unwrap().is_none());
    assert!(shortest_path(&graph, 3, 1).unwrap().is_none());
    assert!(shortest_path(&graph, 2, 3).unwrap().is_some());
}

#[test]
fn test_unknown_vertex_is_rejected() {
    let graph = diamond();
    assert!(matches!(shortest_path(&graph, 0, 42), Err(Error::InvalidVertex(42))));
    assert!(matches!(shortest_path(&graph, 42, 0), Err(Error::InvalidVertex(42))));
}

#[test]
fn test_source_equals_sink() {
    let graph = diamond();
    let path = shortest_path(&graph, 2, 2).unwrap().unwrap();
    assert_eq!(path.vertices(), &[2]);
    assert_eq!(path.weight(), OrderedFloat(0.0));
}

#[test]
fn test_soft_removal_reroutes_query() {
    let mut graph = diamond();

    graph.remove_vertex(1);
    let path = shortest_path(&graph, 0, 3).unwrap().unwrap();
    assert_eq!(path.vertices(), &[0, 2, 3]);
    assert_eq!(path.weight(), OrderedFloat(5.0));

    graph.recover_vertex(1);
    graph.remove_edge(2, 3);
    let path = shortest_path(&graph, 0, 3).unwrap().unwrap();
    assert_eq!(path.vertices(), &[0, 1, 3]);

    graph.remove_vertex(3);
    assert!(shortest_path(&graph, 0, 3).unwrap().is_none());
}

#[test]
fn test_reverse_flower_distances_match_queries() {
    let graph = generate_random_integral(40, 3.0, 9, 11);
    let sink = 39;

    let mut tree = Dijkstra::new();
    tree.reverse_flower(&graph, sink);
    assert_eq!(tree.root(), Some(sink));
    assert_eq!(tree.distance(sink), Some(OrderedFloat(0.0)));

    for source in 0..40 {
        let direct = shortest_path(&graph, source, sink).unwrap();
        assert_eq!(direct.map(|p| p.weight()), tree.distance(source), "vertex {}", source);
    }
}

#[test]
fn test_dijkstra_agrees_with_exhaustive_search() {
    for seed in 0..10 {
        let graph = generate_random_integral(9, 2.5, 6, seed);
        let mut dijkstra = Dijkstra::new();
        let mut exhaustive = ExhaustiveSearch::new();

        for (source, sink) in [(0, 8), (3, 5), (8, 1)] {
            let fast = dijkstra.shortest_path(&graph, source, sink).unwrap();
            let slow = exhaustive.shortest_path(&graph, source, sink).unwrap();
            assert_eq!(
                fast.map(|p| p.weight()),
                slow.map(|p| p.weight()),
                "seed {} pair {} -> {}",
                seed,
                source,
                sink
            );
        }
    }
}

#[test]
fn test_grid_corner_to_corner() {
    let graph = generate_grid(8, 8, 3);
    let path = shortest_path(&graph, 0, 63).unwrap().unwrap();
    // every monotone walk across an 8x8 grid takes 14 steps
    assert_eq!(path.len(), 15);
    assert_eq!(path.source(), Some(0));
    assert_eq!(path.sink(), Some(63));

    let total: f64 = path
        .edges()
        .map(|(u, v)| graph.edge_weight(u, v).unwrap().into_inner())
        .sum();
    assert_eq!(OrderedFloat(total), path.weight());
}
