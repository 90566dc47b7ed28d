use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::graph::{DirectedGraph, Graph, Path};

/// Represents a node in the graph for web clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub label: String,
    pub out_degree: usize,
    pub in_degree: usize,
}

/// Represents an edge in the graph for web clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Represents a complete graph for web clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

impl From<&DirectedGraph<OrderedFloat<f64>>> for WebGraph {
    fn from(graph: &DirectedGraph<OrderedFloat<f64>>) -> Self {
        let nodes = graph
            .vertex_ids()
            .map(|id| WebNode {
                id,
                label: format!("Node {}", id),
                out_degree: graph.successors(id).count(),
                in_degree: graph.predecessors(id).count(),
            })
            .collect();

        let links = graph
            .edges()
            .into_iter()
            .map(|(source, target, weight)| WebEdge {
                source,
                target,
                weight: weight.into_inner(),
            })
            .collect();

        WebGraph { nodes, links }
    }
}

/// One directed edge of an uploaded graph
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeSpec {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// JSON form of the edge-list ingestion format
#[derive(Debug, Deserialize)]
pub struct GraphUploadRequest {
    pub vertex_count: usize,
    pub edges: Vec<EdgeSpec>,
}

/// Parameters for a single shortest path query
#[derive(Debug, Deserialize)]
pub struct PathRequest {
    pub source: usize,
    pub target: usize,
}

/// Parameters for a top-K query
#[derive(Debug, Deserialize)]
pub struct KPathsRequest {
    pub source: usize,
    pub target: usize,
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize { 5 }

/// A path as returned to web clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathView {
    pub vertices: Vec<usize>,
    pub weight: f64,
    pub hops: usize,
}

impl From<&Path<OrderedFloat<f64>>> for PathView {
    fn from(path: &Path<OrderedFloat<f64>>) -> Self {
        PathView {
            vertices: path.vertices().to_vec(),
            weight: path.weight().into_inner(),
            hops: path.len().saturating_sub(1),
        }
    }
}

/// Response of a single shortest path query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortestPathResponse {
    pub execution_id: Uuid,
    pub source: usize,
    pub target: usize,
    pub found: bool,
    pub path: Option<PathView>,
    pub execution_time_ms: f64,
}

/// Response of a top-K query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KPathsResponse {
    pub execution_id: Uuid,
    pub source: usize,
    pub target: usize,
    pub requested_k: usize,
    pub effective_k: usize,
    pub paths: Vec<PathView>,
    pub execution_time_ms: f64,
}

/// Error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Public description of a stored session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Session holding an uploaded graph
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub graph: DirectedGraph<OrderedFloat<f64>>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: DirectedGraph<OrderedFloat<f64>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph,
            created_at: Utc::now(),
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            vertex_count: self.graph.vertex_count(),
            edge_count: self.graph.edge_count(),
            created_at: self.created_at,
        }
    }
}
