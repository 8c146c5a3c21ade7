use crate::error::{OperationError, Result};
use crate::math::Point2;
use crate::topology::Shape;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

/// Computes the axis-aligned bounding box of a shape's vertex set.
#[derive(Debug, Default)]
pub struct BoundingBox;

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the shape has no vertices.
    pub fn execute(&self, shape: &Shape) -> Result<Aabb> {
        let Some(first) = shape.vertices.first() else {
            return Err(
                OperationError::InvalidInput("bounding box of an empty shape".to_owned()).into(),
            );
        };
        let mut min = *first;
        let mut max = *first;
        for v in &shape.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        Ok(Aabb { min, max })
    }
}
