use thiserror::Error;

/// Everything that can go wrong while simplifying.
///
/// All of these are input-contract errors: nothing here is retried.
#[derive(Debug, Error)]
pub enum SimplifyError {
    #[error("invalid simplify resolution: {0}")]
    InvalidResolution(String),

    #[error("unknown simplification method: {0}")]
    UnknownMethod(String),

    #[error("simplify percentage must be between 0 and 1, got {0}")]
    InvalidPercentage(f64),

    #[error("simplify interval must be non-negative, got {0}")]
    InvalidInterval(f64),

    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("arc {arc_id} has {len} vertices; an arc needs at least 2")]
    DegenerateArc { arc_id: usize, len: usize },

    #[error("arc {arc_id} has {expected} vertices but {actual} thresholds")]
    ThresholdMismatch {
        arc_id: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid vertex data: {0}")]
    InvalidVertexData(String),
}

pub type Result<T> = std::result::Result<T, SimplifyError>;
