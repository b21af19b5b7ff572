use thiserror::Error;

/// Errors raised while building or validating a [`Track`](crate::Track).
///
/// These are configuration-time integrity checks.
/// They fail fast and are not meant to be retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error("line segment has zero length")]
    ZeroLengthSegment,

    #[error("degenerate centerline segment around index {index}")]
    DegenerateCenterline { index: usize },

    #[error("centerline needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("track width must be finite and positive, got {width}")]
    InvalidWidth { width: f64 },

    #[error("{label} index {index} is out of range for a centerline of {len} points")]
    IndexOutOfRange {
        label: String,
        index: usize,
        len: usize,
    },

    #[error("{label} is not perpendicular to track tangent (dot={dot})")]
    NotPerpendicular { label: String, dot: f64 },

    #[error("{label} does not span the track width ({length} < {width})")]
    InsufficientSpan {
        label: String,
        length: f64,
        width: f64,
    },
}
