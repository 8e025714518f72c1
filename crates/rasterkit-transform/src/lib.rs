//! rasterkit-transform - Resampling and color interpolation
//!
//! This crate provides:
//!
//! - Per-format scalar and bilinear color interpolation ([`interp`])
//! - Nearest-neighbor and bilinear resizing into a pre-allocated buffer
//!   ([`resize`])
//! - Thumbnail rendering and a caller-owned thumbnail cache ([`thumbnail`])

mod error;
pub mod interp;
pub mod resize;
pub mod thumbnail;

pub use error::{TransformError, TransformResult};
pub use interp::{
    ColorModel, GrayAlphaModel, IndexedModel, RgbaModel, bilerp_gray, bilerp_rgba, lerp,
    lerp_gray, lerp_rgba,
};
pub use resize::{ResizeMethod, resize, resize_to_size};
pub use thumbnail::{ThumbnailCache, ThumbnailOptions, render_thumbnail};
