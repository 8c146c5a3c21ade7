mod bounding_box;
mod displacement;
mod mass_properties;
mod roughness;
mod stability;

pub use bounding_box::{Aabb, BoundingBox};
pub use displacement::{Displacement, DisplacementReport};
pub use mass_properties::{MassProperties, MassResult};
pub use roughness::{Roughness, RoughnessReport};
pub use stability::{Stability, StabilityReport, SupportInterval};

pub(crate) use displacement::measure as displacement_stats;
pub(crate) use roughness::smoothing_score;
