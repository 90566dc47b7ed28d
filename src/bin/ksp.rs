use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kpaths::graph::{load_graph, DirectedGraph, Graph};
use kpaths::web::models::PathView;
use kpaths::{Error, KShortestPaths, Path};
use ordered_float::OrderedFloat;

/// Print the top-K loopless shortest paths between two vertices of a graph file
#[derive(Debug, Parser)]
#[command(name = "ksp", version)]
struct Args {
    /// Graph in edge-list format: vertex count, then `source sink weight` lines
    graph: PathBuf,

    /// Source vertex ID
    #[arg(short, long)]
    source: usize,

    /// Target vertex ID
    #[arg(short, long)]
    target: usize,

    /// Number of paths to report
    #[arg(short, default_value_t = 5)]
    k: usize,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let graph: DirectedGraph<OrderedFloat<f64>> = load_graph(&args.graph)?;
    log::info!(
        "loaded {} ({} vertices, {} edges)",
        args.graph.display(),
        graph.vertex_count(),
        graph.edge_count()
    );

    for id in [args.source, args.target] {
        if !graph.contains_vertex(id) {
            return Err(Error::InvalidVertex(id).into());
        }
    }

    let search = KShortestPaths::new(&graph, args.source, args.target)?;
    let paths: Vec<_> = search.take(args.k).collect();

    if args.json {
        println!("{}", render_json(&paths)?);
        return Ok(());
    }

    print!("{}", render_text(&paths, args.source, args.target, args.k));
    Ok(())
}

fn render_json(paths: &[Path<OrderedFloat<f64>>]) -> serde_json::Result<String> {
    let views: Vec<PathView> = paths.iter().map(PathView::from).collect();
    serde_json::to_string_pretty(&views)
}

fn render_text(paths: &[Path<OrderedFloat<f64>>], source: usize, target: usize, k: usize) -> String {
    if paths.is_empty() {
        return format!("No path from {} to {}\n", source, target);
    }

    let mut out = format!("Top {} shortest paths from {} to {}:\n", paths.len(), source, target);
    for (rank, path) in paths.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", rank + 1, path));
    }
    if paths.len() < k {
        out.push_str(&format!("(only {} of {} requested paths exist)\n", paths.len(), k));
    }
    out
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
