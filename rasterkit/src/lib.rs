//! rasterkit - Format-aware raster resampling for Rust
//!
//! # Overview
//!
//! rasterkit rescales pixel buffers and repairs the color of fully
//! transparent pixels, bit-exact across three pixel formats:
//!
//! - Truecolor with alpha, grayscale with alpha, and palette-indexed images
//! - Nearest-neighbor and bilinear resizing, with palette re-quantization
//!   for indexed images
//! - Transparent color fixup (alpha bleeding)
//! - Thumbnail rendering with a caller-owned cache
//!
//! # Example
//!
//! ```
//! use rasterkit::{Pix, PixelFormat, color};
//! use rasterkit::filter::fixup_transparent_colors_copy;
//! use rasterkit::transform::{ResizeMethod, resize_to_size};
//!
//! let white = color::compose_rgb(255, 255, 255);
//! let clear = color::compose_rgba(0, 0, 0, 0);
//! let pix = Pix::from_data(2, 1, PixelFormat::Rgba, &[white, clear]).unwrap();
//!
//! let fixed = fixup_transparent_colors_copy(&pix).unwrap();
//! let big = resize_to_size(&fixed, 8, 4, ResizeMethod::Bilinear, None, None).unwrap();
//! assert_eq!(big.width(), 8);
//! assert!(big.data().iter().all(|&p| color::red(p) == 255));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rasterkit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rasterkit_filter as filter;
pub use rasterkit_transform as transform;
