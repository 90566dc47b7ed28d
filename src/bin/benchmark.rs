use std::time::{Duration, Instant};
use kpaths::graph::generators::{generate_grid, generate_random};
use kpaths::graph::{DirectedGraph, Graph};
use kpaths::KShortestPaths;
use ordered_float::OrderedFloat;

// Time a top-K search and report how many paths it found
fn benchmark_k_paths(
    name: &str,
    graph: &DirectedGraph<OrderedFloat<f64>>,
    source: usize,
    target: usize,
    k: usize,
) -> (Duration, usize) {
    println!("Running {} (k = {}) on graph with {} vertices...", name, k, graph.vertex_count());

    let start = Instant::now();
    let found = match KShortestPaths::new(graph, source, target) {
        Ok(search) => search.take(k).count(),
        Err(err) => {
            eprintln!("  - search failed: {}", err);
            0
        }
    };
    let duration = start.elapsed();

    println!("  - Found {} paths in {:?}", found, duration);
    (duration, found)
}

fn main() {
    env_logger::init();

    // Random graphs of increasing size
    let graph_sizes = vec![100, 1_000, 5_000, 20_000];
    let ks = vec![1, 10, 50];

    // Edge factor: average number of edges per vertex
    let edge_factor = 4.0;

    println!("=====================================================");
    println!("Benchmark: Yen/Lawler K shortest loopless paths");
    println!("Edge factor: {} edges per vertex (on average)", edge_factor);
    println!("=====================================================");

    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating random graph with {} vertices...", size);
        let graph = generate_random(size, edge_factor, 100.0, size as u64);
        println!("Graph has {} vertices and {} edges", graph.vertex_count(), graph.edge_count());

        for &k in &ks {
            let (duration, found) = benchmark_k_paths("random", &graph, 0, size - 1, k);
            results.push((format!("random-{}", size), k, duration, found));
        }
    }

    for &side in &[10usize, 30, 60] {
        println!("\nGenerating {}x{} grid...", side, side);
        let graph = generate_grid(side, side, side as u64);
        for &k in &ks {
            let (duration, found) = benchmark_k_paths("grid", &graph, 0, side * side - 1, k);
            results.push((format!("grid-{}x{}", side, side), k, duration, found));
        }
    }

    // Print summary table
    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<14} | {:<6} | {:<12} | {:<8} | {:<12}", "Graph", "K", "Time (ms)", "Paths", "ms / path");
    println!("-----------------------------------------------------");

    for (graph, k, duration, found) in &results {
        let per_path = if *found > 0 {
            duration.as_secs_f64() * 1000.0 / *found as f64
        } else {
            0.0
        };
        println!(
            "{:<14} | {:<6} | {:<12.2} | {:<8} | {:<12.3}",
            graph,
            k,
            duration.as_secs_f64() * 1000.0,
            found,
            per_path
        );
    }
}
