use crate::error::Result;
use crate::math::{polygon_2d, Point2, AREA_TOLERANCE};
use crate::topology::{trace_loops, Loop, Shape};

/// Area and centroid of a shape.
#[derive(Debug, Clone, Copy)]
pub struct MassResult {
    /// Unsigned enclosed area.
    pub area: f64,
    /// Area centroid; the vertex mean for degenerate shapes.
    pub centroid: Point2,
}

/// Computes the area and centroid of a shape via the shoelace formula.
///
/// All boundary loops feed one shared accumulator, so a hole traversed with
/// winding opposite to the outer boundary subtracts its area and centroid
/// moment automatically. A shape with no loops, or whose signed area falls
/// under the degeneracy tolerance, reports area 0 with the vertex mean as
/// centroid. That is a defined result, not an error: interactive editing
/// passes through many transient degenerate states.
#[derive(Debug, Default)]
pub struct MassProperties {
    loops: Option<Vec<Loop>>,
}

impl MassProperties {
    /// Creates a new `MassProperties` query.
    #[must_use]
    pub fn new() -> Self {
        Self { loops: None }
    }

    /// Uses pre-traced loops instead of tracing the shape's edges.
    ///
    /// Loop topology depends only on the edge set, so callers that move
    /// vertices between evaluations may trace once and reuse.
    #[must_use]
    pub fn with_loops(mut self, loops: Vec<Loop>) -> Self {
        self.loops = Some(loops);
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape's edge graph references an invalid
    /// vertex index.
    pub fn execute(&self, shape: &Shape) -> Result<MassResult> {
        let result = match &self.loops {
            Some(loops) => mass_from_loops(&shape.vertices, loops),
            None => {
                let traced = trace_loops(shape.vertex_count(), &shape.edges)?;
                mass_from_loops(&shape.vertices, &traced)
            }
        };
        Ok(result)
    }
}

/// Shoelace mass properties of pre-traced loops over a vertex set.
fn mass_from_loops(vertices: &[Point2], loops: &[Loop]) -> MassResult {
    let mut sums = polygon_2d::ShoelaceSums::default();
    for boundary in loops {
        let ring = &boundary.vertices;
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[(i + 1) % ring.len()];
            sums.push_segment(&vertices[a], &vertices[b]);
        }
    }

    let signed = sums.signed_area();
    if signed.abs() < AREA_TOLERANCE {
        return MassResult {
            area: 0.0,
            centroid: polygon_2d::vertex_mean(vertices),
        };
    }
    let scale = 1.0 / (6.0 * signed);
    MassResult {
        area: signed.abs(),
        centroid: Point2::new(sums.cx * scale, sums.cy * scale),
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
    fn unit_square() {
        let shape = Shape::closed(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]);
        let mass = MassProperties::new().execute(&shape).unwrap();
        assert_relative_eq!(mass.area, 1.0);
        assert_relative_eq!(mass.centroid.x, 0.5);
        assert_relative_eq!(mass.centroid.y, 0.5);
    }

    #[test]
    fn winding_reversal_preserves_area_and_centroid() {
        let ccw = Shape::closed(vec![p(0.0, 0.0), p(3.0, 0.0), p(3.0, 1.0), p(0.0, 1.0)]);
        let cw = Shape::closed(vec![p(0.0, 1.0), p(3.0, 1.0), p(3.0, 0.0), p(0.0, 0.0)]);
        let a = MassProperties::new().execute(&ccw).unwrap();
        let b = MassProperties::new().execute(&cw).unwrap();
        assert_relative_eq!(a.area, b.area);
        assert_relative_eq!(a.centroid.x, b.centroid.x);
        assert_relative_eq!(a.centroid.y, b.centroid.y);
    }

    #[test]
    fn square_with_hole() {
        let mut shape = Shape::closed(vec![
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 4.0),
            p(0.0, 4.0),
        ]);
        shape.add_hole(vec![p(1.0, 1.0), p(1.0, 3.0), p(3.0, 3.0), p(3.0, 1.0)]);
        let mass = MassProperties::new().execute(&shape).unwrap();
        assert_relative_eq!(mass.area, 12.0);
        assert_relative_eq!(mass.centroid.x, 2.0);
        assert_relative_eq!(mass.centroid.y, 2.0);
    }

    #[test]
    fn hourglass_lobes_share_a_vertex() {
        let vertices = vec![
            p(-2.0, 0.0),
            p(-2.0, 2.0),
            p(0.0, 2.0),
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, -2.0),
            p(0.0, -2.0),
        ];
        let edges = vec![
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            [3, 4],
            [4, 5],
            [5, 6],
            [6, 3],
        ];
        let shape = Shape::new(vertices, edges).unwrap();
        let mass = MassProperties::new().execute(&shape).unwrap();
        assert_relative_eq!(mass.area, 8.0);
        assert_relative_eq!(mass.centroid.x, 0.0);
        assert_relative_eq!(mass.centroid.y, 0.0);
    }

    #[test]
    fn no_loops_falls_back_to_vertex_mean() {
        let shape = Shape {
            vertices: vec![p(1.0, 1.0), p(3.0, 5.0)],
            edges: vec![[0, 1]],
        };
        let mass = MassProperties::new().execute(&shape).unwrap();
        assert_relative_eq!(mass.area, 0.0);
        assert_relative_eq!(mass.centroid.x, 2.0);
        assert_relative_eq!(mass.centroid.y, 3.0);
    }

    #[test]
    fn collinear_ring_is_degenerate() {
        let shape = Shape::closed(vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
        let mass = MassProperties::new().execute(&shape).unwrap();
        assert_relative_eq!(mass.area, 0.0);
        assert_relative_eq!(mass.centroid.x, 1.0);
        assert_relative_eq!(mass.centroid.y, 0.0);
    }

    #[test]
    fn empty_shape_reports_origin() {
        let shape = Shape::default();
        let mass = MassProperties::new().execute(&shape).unwrap();
        assert_relative_eq!(mass.area, 0.0);
        assert_relative_eq!(mass.centroid.x, 0.0);
        assert_relative_eq!(mass.centroid.y, 0.0);
    }

    #[test]
    fn pretraced_loops_survive_vertex_motion() {
        let mut shape = Shape::closed(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]);
        let loops = trace_loops(shape.vertex_count(), &shape.edges).unwrap();
        let query = MassProperties::new().with_loops(loops);
        assert_relative_eq!(query.execute(&shape).unwrap().area, 1.0);
        // Stretch the square into a 2x1 rectangle; topology is unchanged.
        shape.vertices[1] = p(2.0, 0.0);
        shape.vertices[2] = p(2.0, 1.0);
        assert_relative_eq!(query.execute(&shape).unwrap().area, 2.0);
    }
}
