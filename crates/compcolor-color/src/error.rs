//! Error types for compcolor-color

use thiserror::Error;

/// Errors that can occur while building ramps or compositing channels
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] compcolor_core::Error),

    /// Contrast window with `low >= high` or a non-finite bound
    #[error("invalid contrast window: low {low} must be below high {high}")]
    InvalidRange { low: f32, high: f32 },

    /// Channel images differ in size
    #[error("shape mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Wrong number of images, ramps, contrasts or slots
    #[error("expected {expected} {what}, got {actual}")]
    Arity {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Ramp name not present in the palette
    #[error("unknown color ramp: {0}")]
    UnknownRamp(String),

    /// Ramp name already registered
    #[error("color ramp already exists: {0}")]
    DuplicateRamp(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A frame sink failed to accept output
    #[error("frame sink error: {0}")]
    Sink(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
