use crate::error::{OperationError, Result};
use crate::math::{Point2, TOLERANCE};
use crate::topology::Shape;

/// Scales a shape uniformly about a center point.
pub struct Scale {
    center: Point2,
    factor: f64,
}

impl Scale {
    /// Creates a new `Scale` operation.
    #[must_use]
    pub fn new(center: Point2, factor: f64) -> Self {
        Self { center, factor }
    }

    /// Executes the scaling, modifying the shape in place.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the factor is not finite
    /// or is too close to zero.
    pub fn execute(&self, shape: &mut Shape) -> Result<()> {
        if !self.factor.is_finite() || self.factor.abs() < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "scale factor must be finite and non-zero, got {}",
                self.factor
            ))
            .into());
        }
        for v in &mut shape.vertices {
            *v = self.center + self.factor * (*v - self.center);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn doubles_about_the_origin() {
        let mut shape = Shape::closed(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]);
        Scale::new(Point2::origin(), 2.0)
            .execute(&mut shape)
            .unwrap();
        assert_relative_eq!(shape.vertices[2].x, 2.0);
        assert_relative_eq!(shape.vertices[2].y, 2.0);
        assert_relative_eq!(shape.vertices[0].x, 0.0);
    }

    #[test]
    fn shrinks_about_a_center() {
        let mut shape = Shape::closed(vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)]);
        Scale::new(p(1.0, 1.0), 0.5).execute(&mut shape).unwrap();
        assert_relative_eq!(shape.vertices[0].x, 0.5);
        assert_relative_eq!(shape.vertices[0].y, 0.5);
        assert_relative_eq!(shape.vertices[2].x, 1.5);
        assert_relative_eq!(shape.vertices[2].y, 1.5);
    }

    #[test]
    fn zero_factor_is_rejected() {
        let mut shape = Shape::closed(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
        assert!(Scale::new(Point2::origin(), 0.0).execute(&mut shape).is_err());
    }
}
