use crate::math::{Point2, GROUND_TOLERANCE};
use crate::topology::Shape;

/// Roughness scores of a shape.
#[derive(Debug, Clone)]
pub struct RoughnessReport {
    /// Total smoothing score over all cyclic vertex triplets.
    pub total: f64,
    /// Per-vertex score against the midpoint of each vertex's index-order
    /// neighbors; ground vertices score zero.
    pub vertex_scores: Vec<f64>,
}

impl RoughnessReport {
    /// The `count` roughest vertices as `(index, score)`, highest first.
    #[must_use]
    pub fn roughest(&self, count: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.vertex_scores.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(count);
        ranked
    }
}

/// Scores how far a shape's outline deviates from local straightness.
///
/// For each cyclic triplet of index-consecutive vertices (v0, v1, v2) the
/// score adds half the squared distance from v1 to the midpoint of v0 and
/// v2. Triplets whose leading or trailing vertex pair rests entirely on the
/// ground are skipped: a deliberately flat base is not roughness. Index
/// order matches boundary order for ring-constructed shapes.
#[derive(Debug)]
pub struct Roughness {
    ground_tolerance: f64,
}

impl Default for Roughness {
    fn default() -> Self {
        Self::new()
    }
}

impl Roughness {
    /// Creates a new `Roughness` query with the default ground tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ground_tolerance: GROUND_TOLERANCE,
        }
    }

    /// Sets the tolerance for counting a vertex as resting on the ground.
    #[must_use]
    pub fn with_ground_tolerance(mut self, tolerance: f64) -> Self {
        self.ground_tolerance = tolerance;
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self, shape: &Shape) -> RoughnessReport {
        RoughnessReport {
            total: smoothing_score(&shape.vertices, self.ground_tolerance),
            vertex_scores: vertex_scores(&shape.vertices, self.ground_tolerance),
        }
    }
}

/// Total smoothing score of a vertex ring; zero for fewer than three
/// vertices.
pub(crate) fn smoothing_score(vertices: &[Point2], ground_tolerance: f64) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let on_ground = |v: &Point2| v.y.abs() < ground_tolerance;
    let mut total = 0.0;
    for i in 0..n {
        let v0 = &vertices[i];
        let v1 = &vertices[(i + 1) % n];
        let v2 = &vertices[(i + 2) % n];
        if (on_ground(v1) && on_ground(v0)) || (on_ground(v2) && on_ground(v1)) {
            continue;
        }
        let mid = Point2::from(0.5 * (v0.coords + v2.coords));
        total += 0.5 * (v1 - mid).norm_squared();
    }
    total
}

/// Per-vertex smoothing score against the midpoint of each vertex's
/// index-order neighbors.
fn vertex_scores(vertices: &[Point2], ground_tolerance: f64) -> Vec<f64> {
    let n = vertices.len();
    if n < 3 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|i| {
            let v = &vertices[i];
            if v.y.abs() < ground_tolerance {
                return 0.0;
            }
            let prev = &vertices[(i + n - 1) % n];
            let next = &vertices[(i + 1) % n];
            let mid = Point2::from(0.5 * (prev.coords + next.coords));
            0.5 * (v - mid).norm_squared()
        })
        .collect()
}
