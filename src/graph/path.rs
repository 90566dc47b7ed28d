use std::fmt;

/// Caller-assigned vertex identifier
pub type VertexId = usize;

/// A vertex of the graph.
///
/// Only the identity lives here. Tentative distances and predecessors belong to
/// whichever shortest-path computation is running, see [`crate::Dijkstra`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    id: VertexId,
}

impl Vertex {
    pub fn new(id: VertexId) -> Self {
        Vertex { id }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }
}

/// An ordered, non-empty sequence of vertices together with its total weight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path<W> {
    vertices: Vec<VertexId>,
    weight: W,
}

impl<W: Copy> Path<W> {
    /// Creates a path from its vertex sequence and total weight
    pub fn new(vertices: Vec<VertexId>, weight: W) -> Self {
        debug_assert!(!vertices.is_empty(), "a path holds at least one vertex");
        Path { vertices, weight }
    }

    pub fn weight(&self) -> W {
        self.weight
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of vertices on the path
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Option<VertexId> {
        self.vertices.get(index).copied()
    }

    pub fn source(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    pub fn sink(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Position of `vertex` on the path
    pub fn position(&self, vertex: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&v| v == vertex)
    }

    /// The prefix ending at `vertex`, inclusive, or `None` if `vertex` is not on the path
    pub fn sub_path(&self, vertex: VertexId) -> Option<&[VertexId]> {
        self.position(vertex).map(|i| &self.vertices[..=i])
    }

    /// Consecutive `(from, to)` pairs along the path
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn into_vertices(self) -> Vec<VertexId> {
        self.vertices
    }
}

impl<W: fmt::Display> fmt::Display for Path<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", vertex)?;
        }
        write!(f, " (weight {})", self.weight)
    }
}
