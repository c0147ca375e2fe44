use thiserror::Error;

/// Rejected shape configuration. The profile table is never built from
/// parameters that fail these checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("shape parameter `{field}` must be finite (got {value})")]
    NonFinite { field: &'static str, value: f32 },
    #[error("shape parameter `{field}` must be non-negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error(
        "control point heights must be non-decreasing: P{index} at {height} is below the previous point at {prev_height}"
    )]
    NonMonotonicHeights {
        index: usize,
        height: f32,
        prev_height: f32,
    },
}
