//! Error types for rasterkit-transform

use rasterkit_core::PixelFormat;
use thiserror::Error;

/// Errors that can occur during resampling and thumbnail rendering
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterkit_core::Error),

    /// Source and destination use different pixel formats
    #[error("pixel format mismatch: source is {src}, destination is {dst}")]
    FormatMismatch { src: PixelFormat, dst: PixelFormat },

    /// Indexed bilinear resampling was requested without a palette
    #[error("palette required for {0}")]
    PaletteRequired(&'static str),

    /// Indexed bilinear resampling was requested without a nearest-index lookup
    #[error("nearest-index lookup required for {0}")]
    LookupRequired(&'static str),

    /// Source has no pixels but the destination does
    #[error("cannot sample an empty {width}x{height} source")]
    EmptySource { width: u32, height: u32 },

    /// Nearest-index lookup produced an index outside the palette
    #[error("lookup returned index {index} for a palette of {len} entries")]
    InvalidLookup { index: u32, len: usize },

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
