//! rasterkit-filter - Pixel filters
//!
//! This crate provides:
//!
//! - Transparent color fixup, which bleeds the color of visible pixels into
//!   neighboring fully transparent ones ([`fixup`])

mod error;
pub mod fixup;

pub use error::{FilterError, FilterResult};
pub use fixup::{fixup_transparent_colors, fixup_transparent_colors_copy};
