mod smooth;
pub mod stabilize;

pub use smooth::Smooth;
pub use stabilize::{
    ObjectiveValues, ObjectiveWeights, Stabilize, StabilizeReport, StabilizeStatus,
};
