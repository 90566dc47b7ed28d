//! kpaths - Shortest and K Shortest Loopless Paths
//!
//! This library computes the single shortest path and the top-K loopless
//! shortest paths between two vertices of a weighted directed graph.
//!
//! The K-paths search is Yen's algorithm with Lawler's optimisation: instead of
//! running a fresh Dijkstra for every spur vertex, a reverse shortest-path tree
//! rooted at the sink is built once per emitted path and then repaired as the
//! vertices of that path are restored one by one.

pub mod algorithm;
pub mod data_structures;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod graph;
#[cfg(feature = "python")]
mod python;
pub mod web;

pub use algorithm::{
    dijkstra::Dijkstra,
    yen::{k_shortest_paths, shortest_path, KShortestPaths},
    ShortestPathAlgorithm,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;
pub use graph::path::{Path, Vertex, VertexId};

/// Problems found while reading a graph in the edge-list ingestion format
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Missing vertex count on the first line")]
    MissingVertexCount,

    #[error("Invalid token '{token}' on line {line}")]
    InvalidToken { line: usize, token: String },

    #[error("Incomplete edge on line {line}: expected 'source sink weight'")]
    IncompleteEdge { line: usize },

    #[error("Invalid edge weight {weight} on line {line}")]
    InvalidWeight { line: usize, weight: f64 },

    #[error("The number of nodes in the graph is {found} instead of {declared}")]
    VertexCountMismatch { declared: usize, found: usize },
}

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(VertexId),

    #[error("Edge weight must be finite and non-negative, got {0}")]
    InvalidWeight(f64),

    #[error("Malformed graph input: {0}")]
    Format(#[from] FormatError),

    #[error("Predecessor chain is broken at vertex {vertex}")]
    BrokenPath { vertex: VertexId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
