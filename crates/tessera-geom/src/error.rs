use thiserror::Error;

/// Errors raised by geometry construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeomError {
    /// Tessellation needs at least one strip and one segment.
    #[error("tessellation resolution must be non-zero (got {strips} strips x {segments} segments)")]
    ZeroResolution { strips: u32, segments: u32 },

    /// A height field was built from a buffer that does not match its size.
    #[error("height field expects {expected} samples, got {got}")]
    SampleCount { expected: usize, got: usize },

    /// A Bézier patch needs at least a 2×2 grid with one point per node.
    #[error("control grid of {rows}x{cols} needs rows*cols points and at least 2x2, got {points}")]
    ControlGrid { rows: usize, cols: usize, points: usize },
}
