//! Balance demo: analyze a leaning shape and optimize it until it stands.
//!
//! Usage:
//! ```text
//! cargo run --example balance
//! RUST_LOG=aplomb=trace cargo run --example balance   # per-iteration logs
//! ```

use aplomb::math::Point2;
use aplomb::operations::modification::{ObjectiveWeights, Stabilize};
use aplomb::operations::query::{MassProperties, Stability};
use aplomb::topology::Shape;

fn main() -> aplomb::Result<()> {
    // Default: WARN for everything, DEBUG for aplomb.
    // Override with RUST_LOG (e.g. RUST_LOG=aplomb=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("aplomb=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // A column leaning to the right off a narrow two-vertex base.
    let mut shape = Shape::closed(vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(2.0, 1.0),
        Point2::new(3.0, 2.0),
        Point2::new(2.0, 2.0),
        Point2::new(1.0, 1.0),
    ]);

    report("before", &shape)?;

    let result = Stabilize::new()
        .with_weights(ObjectiveWeights {
            stability: 1.0,
            smoothness: 0.1,
            similarity: 0.1,
            ..ObjectiveWeights::default()
        })
        .with_learning_rate(0.02)
        .with_max_iterations(2000)
        .execute(&mut shape)?;

    println!(
        "optimizer: {:?} after {} iterations, final loss {:.6}, max drift {:.3} at vertex {}",
        result.status,
        result.iterations,
        result.final_loss,
        result.max_displacement,
        result.max_displacement_index
    );

    report("after", &shape)?;
    Ok(())
}

fn report(label: &str, shape: &Shape) -> aplomb::Result<()> {
    let mass = MassProperties::new().execute(shape)?;
    let stability = Stability::new().execute(shape)?;
    println!(
        "{label}: area {:.3}, centroid ({:.3}, {:.3}), support [{:.3}, {:.3}] -> {}",
        mass.area,
        mass.centroid.x,
        mass.centroid.y,
        stability.support.x_left,
        stability.support.x_right,
        if stability.is_stable {
            "stands"
        } else {
            "tips over"
        }
    );
    Ok(())
}
