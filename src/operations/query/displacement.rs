use crate::error::{OperationError, Result};
use crate::math::Point2;
use crate::topology::Shape;

/// Per-vertex drift of a shape against a reference vertex set.
#[derive(Debug, Clone)]
pub struct DisplacementReport {
    /// Euclidean distance between each vertex and its reference.
    pub distances: Vec<f64>,
    /// Largest per-vertex distance.
    pub max: f64,
    /// Index of the vertex with the largest distance.
    pub max_index: usize,
    /// Mean per-vertex distance.
    pub mean: f64,
}

/// Measures how far each vertex of a shape has drifted from a same-length
/// reference vertex sequence, by index correspondence.
#[derive(Debug)]
pub struct Displacement {
    reference: Vec<Point2>,
}

impl Displacement {
    /// Creates a new `Displacement` query against the given reference
    /// vertices.
    #[must_use]
    pub fn new(reference: Vec<Point2>) -> Self {
        Self { reference }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the shape and the
    /// reference differ in vertex count.
    pub fn execute(&self, shape: &Shape) -> Result<DisplacementReport> {
        if shape.vertex_count() != self.reference.len() {
            return Err(OperationError::InvalidInput(format!(
                "shape has {} vertices but the reference has {}",
                shape.vertex_count(),
                self.reference.len()
            ))
            .into());
        }
        Ok(measure(&shape.vertices, &self.reference))
    }
}

/// Displacement statistics for two equal-length vertex sequences.
pub(crate) fn measure(vertices: &[Point2], reference: &[Point2]) -> DisplacementReport {
    let distances: Vec<f64> = vertices
        .iter()
        .zip(reference)
        .map(|(v, r)| (v - r).norm())
        .collect();
    let mut max = 0.0;
    let mut max_index = 0;
    for (i, &d) in distances.iter().enumerate() {
        if d > max {
            max = d;
            max_index = i;
        }
    }
    let mean = if distances.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let n = distances.len() as f64;
        distances.iter().sum::<f64>() / n
    };
    DisplacementReport {
        distances,
        max,
        max_index,
        mean,
    }
}
