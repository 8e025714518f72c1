//! PIX - The pixel buffer
//!
//! The `Pix` structure is the image type consumed and produced by the
//! resampler and the filters. It stores one packed `u32` per pixel; the
//! meaning of that word depends on the buffer's [`PixelFormat`].
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major, `width` words per row, no padding
//! - Truecolor: `0xRRGGBBAA`
//! - Grayscale: `0x0000VVAA`
//! - Indexed: palette index in `[0, 256)`
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.
//!
//! Because a `PixMut` always owns its storage exclusively, a `&Pix` source
//! and a `&mut PixMut` destination can never alias.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel encoding of a buffer
///
/// Fixed for the lifetime of a buffer; resampling never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 8-bit R, G, B and A
    #[default]
    Rgba,
    /// 8-bit value and 8-bit alpha
    GrayAlpha,
    /// Palette index
    Indexed,
}

impl PixelFormat {
    /// Mask of the significant bits of a packed value in this format.
    pub fn value_mask(self) -> u32 {
        match self {
            PixelFormat::Rgba => u32::MAX,
            PixelFormat::GrayAlpha => 0xffff,
            PixelFormat::Indexed => 0xff,
        }
    }

    /// Whether pixels of this format carry their own alpha channel.
    pub fn has_alpha(self) -> bool {
        !matches!(self, PixelFormat::Indexed)
    }

    /// Short human readable name.
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Rgba => "rgba",
            PixelFormat::GrayAlpha => "gray-alpha",
            PixelFormat::Indexed => "indexed",
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel encoding
    format: PixelFormat,
    /// Packed pixel values, `width * height` words
    data: Vec<u32>,
}

impl PixData {
    fn zeroed(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = pixel_count(width, height)?;
        Ok(PixData {
            width,
            height,
            format,
            data: vec![0u32; len],
        })
    }
}

/// Number of pixels in a `width x height` buffer.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] if the count overflows `usize`.
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::InvalidDimension { width, height })
}

/// PIX - Pixel buffer
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use rasterkit_core::{Pix, PixelFormat};
///
/// let pix = Pix::new(64, 48, PixelFormat::Rgba).unwrap();
/// assert_eq!(pix.width(), 64);
/// assert_eq!(pix.height(), 48);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and format.
    ///
    /// The image data is initialized to zero. A zero width or height is
    /// allowed and yields an empty buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `width * height` overflows.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::zeroed(width, height, format)?),
        })
    }

    /// Create a PIX from row-major packed pixel values.
    ///
    /// Values are masked to the format's significant bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, format: PixelFormat, data: &[u32]) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        let mask = format.value_mask();
        let inner = PixData {
            width,
            height,
            format,
            data: data.iter().map(|&v| v & mask).collect(),
        };
        Ok(Pix {
            inner: Arc::new(inner),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Check whether the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the pixels of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Create a new zeroed PIX with the same dimensions and format.
    pub fn create_template(&self) -> Self {
        let inner = PixData {
            width: self.inner.width,
            height: self.inner.height,
            format: self.inner.format,
            data: vec![0u32; self.inner.data.len()],
        };
        Pix {
            inner: Arc::new(inner),
        }
    }

    /// Check if two PIX have the same width, height and format.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.format == other.inner.format
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.copy_data()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns a [`PixMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.copy_data(),
        }
    }

    fn copy_data(&self) -> PixData {
        PixData {
            width: self.inner.width,
            height: self.inner.height,
            format: self.inner.format,
            data: self.inner.data.clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zeroed mutable PIX.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `width * height` overflows.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::zeroed(width, height, format)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Check whether the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable raw access to the image data.
    ///
    /// Callers are responsible for keeping values within the format's
    /// significant bits.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to the pixels of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Set every pixel to `val` (masked to the format).
    pub fn fill(&mut self, val: u32) {
        let val = val & self.inner.format.value_mask();
        self.inner.data.fill(val);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, PixelFormat::GrayAlpha).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.format(), PixelFormat::GrayAlpha);
        assert_eq!(pix.data().len(), 20_000);
        assert!(pix.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_pix_creation_empty() {
        let pix = Pix::new(0, 10, PixelFormat::Rgba).unwrap();
        assert!(pix.is_empty());
        let pix = Pix::new(10, 0, PixelFormat::Indexed).unwrap();
        assert!(pix.is_empty());
    }

    #[test]
    fn test_from_data_length_mismatch() {
        let err = Pix::from_data(2, 2, PixelFormat::Rgba, &[0, 1, 2]).unwrap_err();
        assert!(matches!(
            err,
            Error::DataLength {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_from_data_masks_values() {
        let pix = Pix::from_data(2, 1, PixelFormat::Indexed, &[0x1ff, 7]).unwrap();
        assert_eq!(pix.data(), &[0xff, 7]);
        let pix = Pix::from_data(1, 1, PixelFormat::GrayAlpha, &[0xabcdef]).unwrap();
        assert_eq!(pix.data(), &[0xcdef]);
    }

    #[test]
    fn test_pix_clone_shares_data() {
        let pix1 = Pix::new(10, 10, PixelFormat::Rgba).unwrap();
        let pix2 = pix1.clone();

        assert_eq!(pix1.ref_count(), 2);
        assert_eq!(pix2.ref_count(), 2);
        assert_eq!(pix1.data().as_ptr(), pix2.data().as_ptr());
    }

    #[test]
    fn test_pix_deep_clone() {
        let pix1 = Pix::new(10, 10, PixelFormat::Rgba).unwrap();
        let pix2 = pix1.deep_clone();

        assert_eq!(pix1.ref_count(), 1);
        assert_eq!(pix2.ref_count(), 1);
        assert_ne!(pix1.data().as_ptr(), pix2.data().as_ptr());
    }

    #[test]
    fn test_try_into_mut_shared_fails() {
        let pix1 = Pix::new(4, 4, PixelFormat::Rgba).unwrap();
        let pix2 = pix1.clone();
        let pix1 = pix1.try_into_mut().unwrap_err();
        drop(pix2);
        assert!(pix1.try_into_mut().is_ok());
    }

    #[test]
    fn test_pix_mut_roundtrip() {
        let mut pm = PixMut::new(3, 2, PixelFormat::GrayAlpha).unwrap();
        pm.fill(0x12345);
        pm.row_data_mut(1)[2] = 0x00ff;
        let pix: Pix = pm.into();
        assert_eq!(pix.row_data(0), &[0x2345, 0x2345, 0x2345]);
        assert_eq!(pix.row_data(1), &[0x2345, 0x2345, 0x00ff]);
    }

    #[test]
    fn test_create_template() {
        let src = Pix::from_data(2, 2, PixelFormat::Indexed, &[1, 2, 3, 4]).unwrap();
        let tmpl = src.create_template();
        assert!(tmpl.sizes_equal(&src));
        assert!(tmpl.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_format_properties() {
        assert!(PixelFormat::Rgba.has_alpha());
        assert!(PixelFormat::GrayAlpha.has_alpha());
        assert!(!PixelFormat::Indexed.has_alpha());
        assert_eq!(PixelFormat::Indexed.to_string(), "indexed");
        assert_eq!(PixelFormat::default(), PixelFormat::Rgba);
    }
}
