pub mod traits;
pub mod dijkstra;
pub mod exhaustive;
pub mod yen;

pub use traits::ShortestPathAlgorithm;
