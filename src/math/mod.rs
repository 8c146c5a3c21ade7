pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance below which an accumulated signed area counts as degenerate.
///
/// Area sums are built from cancelling cross products, so this sits well
/// above [`TOLERANCE`].
pub const AREA_TOLERANCE: f64 = 1e-9;

/// Tolerance for testing whether a vertex rests on the ground plane (y = 0)
/// or on the support level of a shape.
///
/// Interactively placed vertices are only approximately aligned, so this is
/// much looser than the tolerances applied to derived quantities.
pub const GROUND_TOLERANCE: f64 = 1e-3;
