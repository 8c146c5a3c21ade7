pub mod loops;
pub mod shape;

pub use loops::{trace_loops, Loop};
pub use shape::{Edge, Shape};
