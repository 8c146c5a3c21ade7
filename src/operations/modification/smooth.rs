use crate::error::{OperationError, Result};
use crate::math::{Point2, GROUND_TOLERANCE};
use crate::topology::Shape;

/// Laplacian outline relaxation.
///
/// Each pass moves every vertex toward the midpoint of its index-order
/// neighbors by the given strength, holding ground vertices in place so a
/// flat base never lifts off its support. Shapes with fewer than three
/// vertices are left untouched.
#[derive(Debug)]
pub struct Smooth {
    iterations: usize,
    strength: f64,
    ground_tolerance: f64,
}

impl Default for Smooth {
    fn default() -> Self {
        Self::new()
    }
}

impl Smooth {
    /// Creates a new `Smooth` operation: one pass at half strength.
    #[must_use]
    pub fn new() -> Self {
        Self {
            iterations: 1,
            strength: 0.5,
            ground_tolerance: GROUND_TOLERANCE,
        }
    }

    /// Sets the number of relaxation passes.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the relaxation strength: 0.0 leaves vertices in place, 1.0
    /// moves them all the way to the neighbor midpoint.
    #[must_use]
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Sets the tolerance for holding ground vertices in place.
    #[must_use]
    pub fn with_ground_tolerance(mut self, tolerance: f64) -> Self {
        self.ground_tolerance = tolerance;
        self
    }

    /// Executes the relaxation, modifying the shape in place.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the strength is outside
    /// [0, 1].
    pub fn execute(&self, shape: &mut Shape) -> Result<()> {
        if !(0.0..=1.0).contains(&self.strength) {
            return Err(OperationError::InvalidInput(format!(
                "smoothing strength must lie in [0, 1], got {}",
                self.strength
            ))
            .into());
        }
        let n = shape.vertex_count();
        if n < 3 {
            return Ok(());
        }

        for _ in 0..self.iterations {
            let current = shape.vertices.clone();
            for i in 0..n {
                let v = current[i];
                if v.y.abs() < self.ground_tolerance {
                    continue;
                }
                let prev = current[(i + n - 1) % n];
                let next = current[(i + 1) % n];
                let mid = Point2::from(0.5 * (prev.coords + next.coords));
                shape.vertices[i] = v + self.strength * (mid - v);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::Roughness;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn spiked_block() -> Shape {
        Shape::closed(vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(1.2, 1.5),
            p(1.0, 2.0),
            p(0.0, 2.0),
            p(0.0, 1.0),
        ])
    }

    #[test]
    fn smoothing_reduces_roughness() {
        let mut shape = spiked_block();
        let before = Roughness::new().execute(&shape).total;
        Smooth::new().with_iterations(3).execute(&mut shape).unwrap();
        let after = Roughness::new().execute(&shape).total;
        assert!(after < before, "roughness rose from {before} to {after}");
    }

    #[test]
    fn ground_vertices_stay_in_place() {
        let mut shape = spiked_block();
        let base = [shape.vertices[0], shape.vertices[1]];
        Smooth::new().with_iterations(5).execute(&mut shape).unwrap();
        assert_eq!(shape.vertices[0], base[0]);
        assert_eq!(shape.vertices[1], base[1]);
    }

    #[test]
    fn full_strength_moves_to_the_midpoint() {
        let mut shape = Shape::closed(vec![p(0.0, 1.0), p(2.0, 1.0), p(2.0, 3.0), p(0.0, 3.0)]);
        Smooth::new().with_strength(1.0).execute(&mut shape).unwrap();
        // The first vertex lands on the midpoint of its original neighbors.
        assert_relative_eq!(shape.vertices[0].x, 1.0);
        assert_relative_eq!(shape.vertices[0].y, 2.0);
    }

    #[test]
    fn out_of_range_strength_is_rejected() {
        let mut shape = spiked_block();
        assert!(Smooth::new().with_strength(1.5).execute(&mut shape).is_err());
        assert!(Smooth::new().with_strength(-0.1).execute(&mut shape).is_err());
    }

    #[test]
    fn tiny_shapes_are_untouched() {
        let mut shape = Shape::closed(vec![p(0.0, 0.5), p(1.0, 0.5)]);
        let original = shape.vertices.clone();
        Smooth::new().execute(&mut shape).unwrap();
        assert_eq!(shape.vertices, original);
    }
}
