//! Error types for rasterkit-filter

use rasterkit_core::PixelFormat;
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Unsupported pixel format for this operation
    #[error("unsupported format: expected {expected}, got {actual}")]
    UnsupportedFormat {
        /// Expected format description
        expected: &'static str,
        /// Actual format
        actual: PixelFormat,
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
