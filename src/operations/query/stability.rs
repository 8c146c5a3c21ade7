use crate::error::Result;
use crate::math::GROUND_TOLERANCE;
use crate::topology::Shape;

use super::MassProperties;

/// Default slack for the centroid-over-support inclusion test.
const DEFAULT_SLACK: f64 = 1e-8;

/// The ground-contact span of a shape: the x-range of vertices resting at
/// its lowest level.
#[derive(Debug, Clone, Copy)]
pub struct SupportInterval {
    /// Leftmost x among the support vertices.
    pub x_left: f64,
    /// Rightmost x among the support vertices.
    pub x_right: f64,
}

impl SupportInterval {
    /// Width of the support span.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_right - self.x_left
    }
}

/// Outcome of a stability test.
#[derive(Debug, Clone, Copy)]
pub struct StabilityReport {
    /// Whether the centroid sits over the support interval.
    pub is_stable: bool,
    /// X-coordinate of the shape's centroid.
    pub centroid_x: f64,
    /// Support interval at the lowest vertex level. Collapses to the mean
    /// vertex x when fewer than two vertices rest there.
    pub support: SupportInterval,
    /// Lowest y-coordinate over all vertices.
    pub y_min: f64,
    /// Number of vertices resting at the lowest level.
    pub support_count: usize,
}

/// Static-tipping stability test: a shape is stable iff its centroid's
/// x-coordinate lies over the x-range of its lowest vertices.
///
/// This is a necessary-condition test only. The centroid height and any
/// dynamic or rotational effects are ignored, and fewer than two
/// ground-contact vertices always count as unstable: a single contact point
/// cannot support a 2D cross-section against tipping.
#[derive(Debug)]
pub struct Stability {
    support_tolerance: f64,
    slack: f64,
}

impl Default for Stability {
    fn default() -> Self {
        Self::new()
    }
}

impl Stability {
    /// Creates a new `Stability` query with default tolerances.
    #[must_use]
    pub fn new() -> Self {
        Self {
            support_tolerance: GROUND_TOLERANCE,
            slack: DEFAULT_SLACK,
        }
    }

    /// Sets the tolerance for counting a vertex as part of the support.
    #[must_use]
    pub fn with_support_tolerance(mut self, tolerance: f64) -> Self {
        self.support_tolerance = tolerance;
        self
    }

    /// Sets the numerical slack applied to the inclusion test at the
    /// interval endpoints.
    #[must_use]
    pub fn with_slack(mut self, slack: f64) -> Self {
        self.slack = slack;
        self
    }

    /// Executes the test.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape's edge graph references an invalid
    /// vertex index.
    pub fn execute(&self, shape: &Shape) -> Result<StabilityReport> {
        let mass = MassProperties::new().execute(shape)?;
        let centroid_x = mass.centroid.x;

        let y_min = shape
            .vertices
            .iter()
            .map(|v| v.y)
            .fold(f64::INFINITY, f64::min);
        let support_x: Vec<f64> = shape
            .vertices
            .iter()
            .filter(|v| (v.y - y_min).abs() < self.support_tolerance)
            .map(|v| v.x)
            .collect();

        if support_x.len() < 2 {
            let center = shape.vertex_mean().x;
            return Ok(StabilityReport {
                is_stable: false,
                centroid_x,
                support: SupportInterval {
                    x_left: center,
                    x_right: center,
                },
                y_min: if y_min.is_finite() { y_min } else { 0.0 },
                support_count: support_x.len(),
            });
        }

        let x_left = support_x.iter().copied().fold(f64::INFINITY, f64::min);
        let x_right = support_x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let is_stable = centroid_x >= x_left - self.slack && centroid_x <= x_right + self.slack;
        Ok(StabilityReport {
            is_stable,
            centroid_x,
            support: SupportInterval { x_left, x_right },
            y_min,
            support_count: support_x.len(),
        })
    }
}
