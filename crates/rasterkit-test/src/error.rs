//! Error types for the test framework

use thiserror::Error;

/// A single failed regression check
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TestError {
    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Images differ in size or format
    #[error("pix comparison failed at index {index}: expected {expected}, got {actual}")]
    PixShapeMismatch {
        index: usize,
        /// `WxH format` of the expected image
        expected: String,
        /// `WxH format` of the actual image
        actual: String,
    },

    /// Images differ at a pixel
    #[error(
        "pix comparison failed at index {index}: pixel ({x}, {y}) expected {expected:#010x}, got {actual:#010x}"
    )]
    PixelMismatch {
        index: usize,
        x: u32,
        y: u32,
        expected: u32,
        actual: u32,
    },

    /// Packed data arrays differ
    #[error("data comparison failed at index {index}: {detail}")]
    DataMismatch { index: usize, detail: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
