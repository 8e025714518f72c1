//! Pixel access functions
//!
//! Functions for getting and setting individual pixels. The checked
//! variants return `None` / an error for out-of-bounds coordinates; the
//! unchecked variants panic instead and are meant for inner loops whose
//! coordinates are already clamped.

use super::{Pix, PixMut, PixelFormat};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn offset(width: u32, height: u32, x: u32, y: u32) -> Option<usize> {
    if x < width && y < height {
        Some(y as usize * width as usize + x as usize)
    } else {
        None
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        offset(self.width(), self.height(), x, y).map(|i| self.data()[i])
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }

    /// Get RGBA values at (x, y).
    ///
    /// Returns `None` for non-truecolor images or out-of-bounds coordinates.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if self.format() != PixelFormat::Rgba {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgba)
    }

    /// Get (value, alpha) at (x, y).
    ///
    /// Returns `None` for non-grayscale images or out-of-bounds coordinates.
    pub fn get_gray(&self, x: u32, y: u32) -> Option<(u8, u8)> {
        if self.format() != PixelFormat::GrayAlpha {
            return None;
        }
        self.get_pixel(x, y)
            .map(|p| (color::gray_value(p), color::gray_alpha(p)))
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        offset(self.width(), self.height(), x, y).map(|i| self.data()[i])
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the format's significant bits, except for
    /// indexed images where a value above 255 is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds
    /// or an indexed value does not fit in a palette index.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        let (w, h) = (self.width(), self.height());
        let i = offset(w, h, x, y).ok_or(Error::IndexOutOfBounds {
            index: y as usize * w as usize + x as usize,
            len: self.data().len(),
        })?;
        let format = self.format();
        if format == PixelFormat::Indexed && val > 0xff {
            return Err(Error::IndexOutOfBounds {
                index: val as usize,
                len: 256,
            });
        }
        self.data_mut()[i] = val & format.value_mask();
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let i = y as usize * self.width() as usize + x as usize;
        let mask = self.format().value_mask();
        self.data_mut()[i] = val & mask;
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for non-truecolor images.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if self.format() != PixelFormat::Rgba {
            return Err(Error::InvalidParameter(format!(
                "set_rgba on {} image",
                self.format()
            )));
        }
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }

    /// Set a grayscale pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for non-grayscale images.
    pub fn set_gray(&mut self, x: u32, y: u32, v: u8, a: u8) -> Result<()> {
        if self.format() != PixelFormat::GrayAlpha {
            return Err(Error::InvalidParameter(format!(
                "set_gray on {} image",
                self.format()
            )));
        }
        self.set_pixel(x, y, color::compose_gray(v, a))
    }
}
