//! rasterkit-core - Basic data structures for raster resampling
//!
//! This crate provides the data structures shared by the rest of the
//! workspace:
//!
//! - [`Pix`] / [`PixMut`] - The pixel buffer (immutable / mutable)
//! - [`PixelFormat`] - Truecolor, grayscale or palette-indexed encoding
//! - [`Palette`] / [`RgbaQuad`] - Color table for indexed images
//! - [`NearestIndex`] / [`RgbMap`] - Nearest palette index lookup

pub mod error;
pub mod palette;
pub mod pix;

pub use error::{Error, Result};
pub use palette::{NearestIndex, Palette, RgbMap, RgbaQuad};
pub use pix::{Pix, PixMut, PixelFormat};

/// Channel helpers for packed pixel values.
///
/// # Pixel format
///
/// - Truecolor pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
/// - Grayscale pixels are stored as `0x0000VVAA` (value, then alpha).
/// - Indexed pixels are the raw palette index.
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Shift of the value byte in a grayscale pixel.
    pub const GRAY_VALUE_SHIFT: u32 = 8;
    /// Shift of the alpha byte in a grayscale pixel.
    pub const GRAY_ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a truecolor pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a truecolor pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a truecolor pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a truecolor pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose an opaque truecolor pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a truecolor pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a truecolor pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a truecolor pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Extract the value from a grayscale pixel.
    #[inline]
    pub fn gray_value(pixel: u32) -> u8 {
        ((pixel >> GRAY_VALUE_SHIFT) & 0xff) as u8
    }

    /// Extract the alpha from a grayscale pixel.
    #[inline]
    pub fn gray_alpha(pixel: u32) -> u8 {
        ((pixel >> GRAY_ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a grayscale pixel.
    #[inline]
    pub fn compose_gray(v: u8, a: u8) -> u32 {
        ((v as u32) << GRAY_VALUE_SHIFT) | ((a as u32) << GRAY_ALPHA_SHIFT)
    }

    /// Clamp an integer channel value to `[0, 255]`.
    #[inline]
    pub fn clamp_channel(v: i32) -> u8 {
        v.clamp(0, 255) as u8
    }

}
