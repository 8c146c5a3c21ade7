use crate::math::{polygon_2d, Point2, Vector2, AREA_TOLERANCE};
use crate::operations::query::smoothing_score;
use crate::topology::Loop;

/// Relative weights of the three balance objectives.
///
/// Each λ carries an independent magnitude scale μ (default 1.0); the
/// effective weight of a term is the product λ·μ. Defaults match the
/// reference tuning: the three λ values split evenly.
#[derive(Debug, Clone, Copy)]
pub struct ObjectiveWeights {
    /// λ₁: pull the centroid over the support.
    pub stability: f64,
    /// λ₂: keep the outline locally smooth.
    pub smoothness: f64,
    /// λ₃: stay close to the reference outline.
    pub similarity: f64,
    /// μ₁ magnitude scale for the stability term.
    pub stability_scale: f64,
    /// μ₂ magnitude scale for the smoothness term.
    pub smoothness_scale: f64,
    /// μ₃ magnitude scale for the similarity term.
    pub similarity_scale: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            stability: 0.33,
            smoothness: 0.33,
            similarity: 0.34,
            stability_scale: 1.0,
            smoothness_scale: 1.0,
            similarity_scale: 1.0,
        }
    }
}

impl ObjectiveWeights {
    /// Effective per-term weights λ·μ in (stability, smoothness,
    /// similarity) order.
    pub(super) fn effective(&self) -> [f64; 3] {
        [
            self.stability * self.stability_scale,
            self.smoothness * self.smoothness_scale,
            self.similarity * self.similarity_scale,
        ]
    }
}

/// Value of each objective at one optimizer state.
///
/// Exposed for diagnostics: the stopping test gates on the weighted sum
/// alone, which mixes the scales of three different quantities, so callers
/// tuning weights need the individual terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectiveValues {
    /// ½(centroid_x − target_x)².
    pub stability: f64,
    /// Σ ½‖v₁ − ½(v₀+v₂)‖² over non-ground triplets.
    pub smoothness: f64,
    /// ½‖V − V_ref‖².
    pub similarity: f64,
}

impl ObjectiveValues {
    /// Weighted total loss under the given weights.
    #[must_use]
    pub fn weighted_total(&self, weights: &ObjectiveWeights) -> f64 {
        let [w1, w2, w3] = weights.effective();
        w1 * self.stability + w2 * self.smoothness + w3 * self.similarity
    }
}

/// Centroid x-coordinate of the traced loops, with the degenerate-area
/// fallback to the vertex mean.
pub(super) fn centroid_x(vertices: &[Point2], loops: &[Loop]) -> f64 {
    let sums = shoelace(vertices, loops);
    let signed = sums.signed_area();
    if signed.abs() < AREA_TOLERANCE {
        polygon_2d::vertex_mean(vertices).x
    } else {
        sums.cx / (6.0 * signed)
    }
}

/// Stability objective: ½(centroid_x − target_x)².
pub(super) fn stability_value(vertices: &[Point2], loops: &[Loop], target_x: f64) -> f64 {
    let dx = centroid_x(vertices, loops) - target_x;
    0.5 * dx * dx
}

/// Smoothness objective; shares the scoring rule with the roughness query.
pub(super) fn smoothness_value(vertices: &[Point2], ground_tolerance: f64) -> f64 {
    smoothing_score(vertices, ground_tolerance)
}

/// Similarity objective: ½‖V − V_ref‖².
pub(super) fn similarity_value(vertices: &[Point2], reference: &[Point2]) -> f64 {
    vertices
        .iter()
        .zip(reference)
        .map(|(v, r)| 0.5 * (v - r).norm_squared())
        .sum()
}

/// Accumulates `weight` times the stability gradient into `gradient`.
///
/// With S_a the accumulated cross sum and S_x the x moment sum, the
/// centroid is C_x = S_x / (3 S_a) and its derivative follows the quotient
/// rule: ∂C_x = (∂S_x − 3 C_x ∂S_a) / (3 S_a). In the degenerate-area
/// branch the centroid is the vertex mean, whose x-gradient is uniform.
pub(super) fn stability_gradient(
    vertices: &[Point2],
    loops: &[Loop],
    target_x: f64,
    weight: f64,
    gradient: &mut [Vector2],
) {
    if vertices.is_empty() {
        return;
    }
    let sums = shoelace(vertices, loops);
    let signed = sums.signed_area();
    if signed.abs() < AREA_TOLERANCE {
        #[allow(clippy::cast_precision_loss)]
        let n = vertices.len() as f64;
        let residual = weight * (polygon_2d::vertex_mean(vertices).x - target_x);
        for entry in gradient.iter_mut() {
            entry.x += residual / n;
        }
        return;
    }

    let cx = sums.cx / (6.0 * signed);
    let residual = weight * (cx - target_x);
    let denom = 3.0 * sums.area;
    for boundary in loops {
        let ring = &boundary.vertices;
        for p in 0..ring.len() {
            let i = ring[p];
            let j = ring[(p + 1) % ring.len()];
            let (xi, yi) = (vertices[i].x, vertices[i].y);
            let (xj, yj) = (vertices[j].x, vertices[j].y);
            let cross = xi * yj - yi * xj;
            let si = xi + xj;

            // Per-coordinate derivatives of S_a and S_x for this segment.
            let d_sa = [yj, -xj, -yi, xi];
            let d_sx = [cross + si * yj, -si * xj, cross - si * yi, si * xi];

            gradient[i].x += residual * (d_sx[0] - 3.0 * cx * d_sa[0]) / denom;
            gradient[i].y += residual * (d_sx[1] - 3.0 * cx * d_sa[1]) / denom;
            gradient[j].x += residual * (d_sx[2] - 3.0 * cx * d_sa[2]) / denom;
            gradient[j].y += residual * (d_sx[3] - 3.0 * cx * d_sa[3]) / denom;
        }
    }
}

/// Accumulates `weight` times the smoothness gradient into `gradient`.
///
/// Each counted triplet contributes d = v₁ − ½(v₀+v₂): the middle vertex
/// receives +d, the two endpoints −d/2.
pub(super) fn smoothness_gradient(
    vertices: &[Point2],
    ground_tolerance: f64,
    weight: f64,
    gradient: &mut [Vector2],
) {
    let n = vertices.len();
    if n < 3 {
        return;
    }
    let on_ground = |v: &Point2| v.y.abs() < ground_tolerance;
    for i in 0..n {
        let i1 = (i + 1) % n;
        let i2 = (i + 2) % n;
        let (v0, v1, v2) = (&vertices[i], &vertices[i1], &vertices[i2]);
        if (on_ground(v1) && on_ground(v0)) || (on_ground(v2) && on_ground(v1)) {
            continue;
        }
        let mid = Point2::from(0.5 * (v0.coords + v2.coords));
        let d = weight * (v1 - mid);
        gradient[i1] += d;
        gradient[i] -= 0.5 * d;
        gradient[i2] -= 0.5 * d;
    }
}

/// Accumulates `weight` times the similarity gradient into `gradient`.
pub(super) fn similarity_gradient(
    vertices: &[Point2],
    reference: &[Point2],
    weight: f64,
    gradient: &mut [Vector2],
) {
    for ((entry, v), r) in gradient.iter_mut().zip(vertices).zip(reference) {
        *entry += weight * (v - r);
    }
}

fn shoelace(vertices: &[Point2], loops: &[Loop]) -> polygon_2d::ShoelaceSums {
    let mut sums = polygon_2d::ShoelaceSums::default();
    for boundary in loops {
        let ring = &boundary.vertices;
        for i in 0..ring.len() {
            sums.push_segment(&vertices[ring[i]], &vertices[ring[(i + 1) % ring.len()]]);
        }
    }
    sums
}
