pub mod traits;
pub mod directed;
pub mod generators;
pub mod loader;
pub mod path;

pub use traits::{Graph, SoftRemoval};
pub use directed::{DirectedGraph, EdgeCode};
pub use loader::{load_graph, parse_graph};
pub use path::{Path, Vertex, VertexId};
