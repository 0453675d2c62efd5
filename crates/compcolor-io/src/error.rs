//! I/O error types
//!
//! Each format module maps its underlying library errors into `IoError`
//! variants so that callers only need to handle one error type.

use thiserror::Error;

/// Error type for stack and frame I/O.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file format or sample type is not supported or not enabled via features
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The data is structurally invalid (wrong page count, bad layout)
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core containers
    #[error("core error: {0}")]
    Core(#[from] compcolor_core::Error),

    /// An error from compositing or export
    #[error("color error: {0}")]
    Color(#[from] compcolor_color::ColorError),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
