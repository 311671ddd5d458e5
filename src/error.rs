//! Error types for stencil runs.
//!
//! Every failure is fatal for the run that raised it. Configuration errors
//! are raised before any grid buffer is allocated.

use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, StencilError>;

/// Upper limit on the number of requested worker threads.
pub const MAX_THREADS: usize = 1024;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StencilError {
    #[error("Invalid number of threads: {0} (must be in [1, {max}])", max = MAX_THREADS)]
    InvalidThreads(i64),

    #[error("iterations must be >= 1 : {0}")]
    InvalidIterations(i64),

    #[error("grid dimension must be positive: {0}")]
    InvalidGridSize(i64),

    #[error("Stencil radius {0} should be positive")]
    RadiusTooSmall(usize),

    #[error("Stencil radius {radius} exceeds grid size {grid_size}")]
    RadiusExceedsGrid { radius: usize, grid_size: usize },

    #[error("Space for {0} x {0} grid cannot be represented")]
    GridTooLarge(usize),

    #[error("tile size must be positive : {0}")]
    InvalidTileSize(i64),

    #[error("{0}")]
    InvalidArguments(String),

    #[error("could not allocate space for {elements} grid values")]
    Allocation { elements: usize },

    #[error("could not start worker pool: {0}")]
    PoolBuild(String),

    #[error(
        "number of requested threads {requested} does not equal number of spawned threads {actual}"
    )]
    WorkerCountMismatch { requested: usize, actual: usize },

    #[error("L1 norm = {norm}, Reference L1 norm = {reference}")]
    ValidationFailed { norm: f64, reference: f64 },
}
