mod objectives;

pub use objectives::{ObjectiveValues, ObjectiveWeights};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{OperationError, Result};
use crate::math::{Point2, Vector2, GROUND_TOLERANCE};
use crate::operations::query::displacement_stats;
use crate::topology::{trace_loops, Loop, Shape};

/// Terminal state of a balance optimization run.
///
/// None of these is an error: callers always receive the final vertex
/// positions, and a partially improved shape is more useful than nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizeStatus {
    /// Total loss fell under the tolerance.
    Converged,
    /// The iteration budget ran out before the loss reached the tolerance.
    Exhausted,
    /// An update produced a non-finite coordinate; the shape was rolled
    /// back to the last finite state.
    Diverged,
    /// The caller raised the cancel flag between iterations.
    Cancelled,
}

/// Outcome of one [`Stabilize`] run.
#[derive(Debug, Clone)]
pub struct StabilizeReport {
    /// Terminal state of the run.
    pub status: StabilizeStatus,
    /// Number of update steps applied.
    pub iterations: usize,
    /// Weighted total loss at the final vertices.
    pub final_loss: f64,
    /// Per-objective values at the final vertices.
    pub objectives: ObjectiveValues,
    /// Largest vertex drift from the reference outline.
    pub max_displacement: f64,
    /// Index of the vertex that drifted the most.
    pub max_displacement_index: usize,
    /// Mean vertex drift from the reference outline.
    pub mean_displacement: f64,
}

impl StabilizeReport {
    /// Whether the run reached the loss tolerance.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == StabilizeStatus::Converged
    }
}

/// Gradient-descent balance optimizer.
///
/// Minimizes the weighted sum of three objectives over the vertex
/// positions (keep the centroid over the support, keep the outline smooth,
/// stay close to the reference outline) while every vertex that starts on
/// the ground stays fixed. The pinned set is an explicit
/// partition decided once from the initial y-coordinates: pinned vertices
/// still participate in every loss term, but the update step only ever
/// writes free vertices.
///
/// Loop topology is traced once per run; only positions change between
/// iterations.
#[derive(Debug)]
pub struct Stabilize {
    weights: ObjectiveWeights,
    learning_rate: f64,
    tolerance: f64,
    max_iterations: usize,
    ground_tolerance: f64,
    reference: Option<Vec<Point2>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Default for Stabilize {
    fn default() -> Self {
        Self::new()
    }
}

impl Stabilize {
    /// Creates a new `Stabilize` operation with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weights: ObjectiveWeights::default(),
            learning_rate: 0.01,
            tolerance: 1e-6,
            max_iterations: 1000,
            ground_tolerance: GROUND_TOLERANCE,
            reference: None,
            cancel: None,
        }
    }

    /// Sets the objective weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the gradient-descent step size.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the total-loss threshold under which the run converges.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the tolerance for pinning vertices that start on the ground.
    #[must_use]
    pub fn with_ground_tolerance(mut self, tolerance: f64) -> Self {
        self.ground_tolerance = tolerance;
        self
    }

    /// Sets the similarity reference outline. Defaults to the input
    /// shape's vertices at the start of the run.
    #[must_use]
    pub fn with_reference(mut self, reference: Vec<Point2>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Installs a cancel flag checked between iterations, so an
    /// interactive caller can abort a long run without losing the progress
    /// made so far.
    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Executes the optimization, updating the shape's vertices in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the learning rate is not a positive finite
    /// number, if an explicit reference outline differs in vertex count,
    /// or if the shape's edge graph references an invalid vertex index.
    pub fn execute(&self, shape: &mut Shape) -> Result<StabilizeReport> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "learning rate must be positive and finite, got {}",
                self.learning_rate
            ))
            .into());
        }
        let loops = trace_loops(shape.vertex_count(), &shape.edges)?;
        let reference: Vec<Point2> = match &self.reference {
            Some(reference) => {
                if reference.len() != shape.vertex_count() {
                    return Err(OperationError::InvalidInput(format!(
                        "reference has {} vertices but the shape has {}",
                        reference.len(),
                        shape.vertex_count()
                    ))
                    .into());
                }
                reference.clone()
            }
            None => shape.vertices.clone(),
        };

        // Partition the vertices once, from the initial positions. Support
        // vertices anchor the shape and define the balance target; they are
        // never moved, whatever the gradient says.
        let free: Vec<usize> = (0..shape.vertex_count())
            .filter(|&i| shape.vertices[i].y.abs() >= self.ground_tolerance)
            .collect();
        let target_x = self.balance_target(shape, free.len());

        let [w_stability, w_smoothness, w_similarity] = self.weights.effective();
        let mut gradient = vec![Vector2::zeros(); shape.vertex_count()];
        let mut previous = shape.vertices.clone();
        let mut status = StabilizeStatus::Exhausted;
        let mut iterations = 0;

        while iterations < self.max_iterations {
            if self.is_cancelled() {
                status = StabilizeStatus::Cancelled;
                break;
            }
            let values = self.evaluate(&shape.vertices, &loops, target_x, &reference);
            let loss = values.weighted_total(&self.weights);
            if loss < self.tolerance {
                status = StabilizeStatus::Converged;
                break;
            }
            trace!(
                iteration = iterations,
                loss,
                stability = values.stability,
                smoothness = values.smoothness,
                similarity = values.similarity,
                "balance step"
            );

            for entry in &mut gradient {
                *entry = Vector2::zeros();
            }
            objectives::stability_gradient(
                &shape.vertices,
                &loops,
                target_x,
                w_stability,
                &mut gradient,
            );
            objectives::smoothness_gradient(
                &shape.vertices,
                self.ground_tolerance,
                w_smoothness,
                &mut gradient,
            );
            objectives::similarity_gradient(
                &shape.vertices,
                &reference,
                w_similarity,
                &mut gradient,
            );

            previous.copy_from_slice(&shape.vertices);
            for &k in &free {
                shape.vertices[k] -= self.learning_rate * gradient[k];
            }
            iterations += 1;

            if shape
                .vertices
                .iter()
                .any(|v| !(v.x.is_finite() && v.y.is_finite()))
            {
                shape.vertices.copy_from_slice(&previous);
                status = StabilizeStatus::Diverged;
                break;
            }
        }

        let final_values = self.evaluate(&shape.vertices, &loops, target_x, &reference);
        let final_loss = final_values.weighted_total(&self.weights);
        let drift = displacement_stats(&shape.vertices, &reference);
        debug!(?status, iterations, final_loss, "balance run finished");
        Ok(StabilizeReport {
            status,
            iterations,
            final_loss,
            objectives: final_values,
            max_displacement: drift.max,
            max_displacement_index: drift.max_index,
            mean_displacement: drift.mean,
        })
    }

    /// Mean x of the pinned support vertices; the mean x of all vertices
    /// when nothing starts on the ground, which keeps the stability term
    /// finite for airborne shapes.
    fn balance_target(&self, shape: &Shape, free_count: usize) -> f64 {
        let pinned_count = shape.vertex_count() - free_count;
        if pinned_count == 0 {
            return shape.vertex_mean().x;
        }
        let sum: f64 = shape
            .vertices
            .iter()
            .filter(|v| v.y.abs() < self.ground_tolerance)
            .map(|v| v.x)
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let count = pinned_count as f64;
        sum / count
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn evaluate(
        &self,
        vertices: &[Point2],
        loops: &[Loop],
        target_x: f64,
        reference: &[Point2],
    ) -> ObjectiveValues {
        ObjectiveValues {
            stability: objectives::stability_value(vertices, loops, target_x),
            smoothness: objectives::smoothness_value(vertices, self.ground_tolerance),
            similarity: objectives::similarity_value(vertices, reference),
        }
    }
}
