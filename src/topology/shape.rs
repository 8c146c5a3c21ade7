use crate::error::TopologyError;
use crate::math::{polygon_2d, Point2};

/// An undirected edge as an unordered pair of vertex indices.
pub type Edge = [usize; 2];

/// A 2D shape: a dense vertex sequence plus an undirected edge set.
///
/// The edge set may contain several disjoint cycles (an outer boundary and
/// holes) and, transiently during interactive construction, dangling or
/// duplicate edges. Loop winding is derived by tracing, never stored.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    /// Vertex positions, indexed 0..N-1.
    pub vertices: Vec<Point2>,
    /// Undirected edges as pairs of vertex indices.
    pub edges: Vec<Edge>,
}

impl Shape {
    /// Creates a shape from explicit vertex and edge sequences.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge references an out-of-range vertex index
    /// or joins a vertex to itself.
    pub fn new(vertices: Vec<Point2>, edges: Vec<Edge>) -> Result<Self, TopologyError> {
        let shape = Self { vertices, edges };
        shape.validate()?;
        Ok(shape)
    }

    /// Creates a closed ring: consecutive vertices joined by edges, the last
    /// vertex joined back to the first.
    ///
    /// Fewer than three vertices cannot form a ring and produce no edges.
    #[must_use]
    pub fn closed(vertices: Vec<Point2>) -> Self {
        let n = vertices.len();
        let edges = if n < 3 {
            Vec::new()
        } else {
            (0..n).map(|i| [i, (i + 1) % n]).collect()
        };
        Self { vertices, edges }
    }

    /// Appends a hole boundary: the given vertices are added to the vertex
    /// sequence and joined into a closed ring of their own, leaving the
    /// existing boundaries untouched.
    ///
    /// A hole traversed with winding opposite to the outer boundary
    /// subtracts from the enclosed area. Fewer than three vertices produce
    /// no edges.
    pub fn add_hole(&mut self, hole_vertices: Vec<Point2>) {
        let start = self.vertices.len();
        let n = hole_vertices.len();
        self.vertices.extend(hole_vertices);
        if n < 3 {
            return;
        }
        self.edges
            .extend((0..n).map(|i| [start + i, start + (i + 1) % n]));
    }

    /// Checks that every edge references a valid vertex index and that no
    /// edge joins a vertex to itself.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EdgeIndexOutOfRange`] or
    /// [`TopologyError::SelfLoop`] on the first violating edge.
    pub fn validate(&self) -> Result<(), TopologyError> {
        validate_edges(self.vertices.len(), &self.edges)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Arithmetic mean of all vertices; the origin for an empty shape.
    #[must_use]
    pub fn vertex_mean(&self) -> Point2 {
        polygon_2d::vertex_mean(&self.vertices)
    }
}

/// Validates an edge list against a vertex count.
pub(crate) fn validate_edges(vertex_count: usize, edges: &[Edge]) -> Result<(), TopologyError> {
    for &[a, b] in edges {
        for index in [a, b] {
            if index >= vertex_count {
                return Err(TopologyError::EdgeIndexOutOfRange {
                    a,
                    b,
                    index,
                    vertex_count,
                });
            }
        }
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
    }
    Ok(())
}
