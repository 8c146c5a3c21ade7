use thiserror::Error;

/// Top-level error type for the Aplomb balance kernel.
#[derive(Debug, Error)]
pub enum AplombError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised by a corrupt shape graph.
///
/// Both variants are fatal: an edge pointing outside the vertex sequence or
/// at its own endpoint means the shape data is broken. Dangling and
/// duplicate edges, by contrast, are legitimate transient editing states
/// and are tolerated everywhere.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("edge ({a}, {b}) references vertex {index}, but the shape has {vertex_count} vertices")]
    EdgeIndexOutOfRange {
        a: usize,
        b: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("edge joins vertex {0} to itself")]
    SelfLoop(usize),
}

/// Errors related to analysis and optimization operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`AplombError`].
pub type Result<T> = std::result::Result<T, AplombError>;
