use nalgebra::Rotation2;

use crate::error::{OperationError, Result};
use crate::math::TOLERANCE;
use crate::topology::Shape;

/// Rotates a shape about the origin so that its lowest edge lies
/// horizontal, ready for ground-contact analysis.
///
/// The lowest edge is the one with the smallest average endpoint y. The
/// rotation angle that levels it is returned.
pub struct RotateToGround;

impl Default for RotateToGround {
    fn default() -> Self {
        Self::new()
    }
}

impl RotateToGround {
    /// Creates a new `RotateToGround` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the rotation, modifying the shape in place and returning
    /// the applied angle in radians.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the shape has no edges,
    /// `OperationError::Failed` if the lowest edge has zero length, or a
    /// topology error if an edge references an invalid vertex index.
    pub fn execute(&self, shape: &mut Shape) -> Result<f64> {
        shape.validate()?;
        let Some(&[a, b]) = shape.edges.iter().min_by(|&&[a, b], &&[c, d]| {
            let lhs = shape.vertices[a].y + shape.vertices[b].y;
            let rhs = shape.vertices[c].y + shape.vertices[d].y;
            lhs.partial_cmp(&rhs).unwrap_or(std::cmp::Ordering::Equal)
        }) else {
            return Err(
                OperationError::InvalidInput("shape has no edges to level".to_owned()).into(),
            );
        };

        let direction = shape.vertices[b] - shape.vertices[a];
        if direction.norm() < TOLERANCE {
            return Err(OperationError::Failed("lowest edge has zero length".to_owned()).into());
        }
        let angle = -direction.y.atan2(direction.x);
        let rotation = Rotation2::new(angle);
        for v in &mut shape.vertices {
            *v = rotation * *v;
        }
        Ok(angle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    /// A wide plank tilted by a known angle about the origin.
    fn tilted_plank(angle: f64) -> Shape {
        let rotation = Rotation2::new(angle);
        let corners = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 1.0), p(0.0, 1.0)];
        Shape::closed(corners.iter().map(|c| rotation * *c).collect())
    }

    #[test]
    fn levels_a_tilted_plank() {
        let mut shape = tilted_plank(0.05);
        let angle = RotateToGround::new().execute(&mut shape).unwrap();
        assert_relative_eq!(angle, -0.05, epsilon = 1e-12);
        // The base edge endpoints end up at the same height.
        assert_relative_eq!(shape.vertices[0].y, shape.vertices[1].y, epsilon = 1e-9);
    }

    #[test]
    fn level_shape_is_left_alone() {
        let mut shape = Shape::closed(vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 2.0), p(0.0, 2.0)]);
        let original = shape.vertices.clone();
        let angle = RotateToGround::new().execute(&mut shape).unwrap();
        assert_relative_eq!(angle, 0.0);
        for (v, o) in shape.vertices.iter().zip(&original) {
            assert_relative_eq!(v.x, o.x, epsilon = 1e-12);
            assert_relative_eq!(v.y, o.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn edgeless_shape_is_rejected() {
        let mut shape = Shape {
            vertices: vec![p(0.0, 0.0), p(1.0, 1.0)],
            edges: vec![],
        };
        assert!(RotateToGround::new().execute(&mut shape).is_err());
    }

    #[test]
    fn zero_length_lowest_edge_fails() {
        let mut shape = Shape {
            vertices: vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 2.0)],
            edges: vec![[0, 1], [1, 2], [2, 0]],
        };
        assert!(RotateToGround::new().execute(&mut shape).is_err());
    }
}
