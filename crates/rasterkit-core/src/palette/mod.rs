//! Palette - Color table for indexed images
//!
//! A palette maps the small integer values of an indexed image to
//! truecolor entries. Index 0 is conventionally the transparent (mask)
//! entry, but the palette itself attaches no meaning to it.

mod lookup;

pub use lookup::{NearestIndex, RgbMap};

use crate::color;
use crate::error::{Error, Result};

/// Maximum number of palette entries (indices fit in a byte).
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// RGBA color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RgbaQuad {
    /// Red component
    pub red: u8,
    /// Green component
    pub green: u8,
    /// Blue component
    pub blue: u8,
    /// Alpha component
    pub alpha: u8,
}

impl RgbaQuad {
    /// Create a new RGBA color
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an RGB color (alpha = 255)
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Create a grayscale color
    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Pack into a truecolor pixel value.
    pub fn to_packed(self) -> u32 {
        color::compose_rgba(self.red, self.green, self.blue, self.alpha)
    }

    /// Unpack a truecolor pixel value.
    pub fn from_packed(pixel: u32) -> Self {
        let (r, g, b, a) = color::extract_rgba(pixel);
        Self::new(r, g, b, a)
    }

    /// Squared Euclidean distance to an RGB triple (alpha ignored).
    #[inline]
    pub fn distance_sq(&self, r: u8, g: u8, b: u8) -> u32 {
        let dr = self.red as i32 - r as i32;
        let dg = self.green as i32 - g as i32;
        let db = self.blue as i32 - b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// Palette for indexed images
///
/// Holds at most [`MAX_PALETTE_ENTRIES`] colors. A palette is never
/// mutated by the resampler or the filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<RgbaQuad>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PaletteFull`] if more than 256 colors are given.
    pub fn from_colors(colors: Vec<RgbaQuad>) -> Result<Self> {
        if colors.len() > MAX_PALETTE_ENTRIES {
            return Err(Error::PaletteFull(MAX_PALETTE_ENTRIES));
        }
        Ok(Self { colors })
    }

    /// Create a linear grayscale ramp with `n` entries (black to white).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `n` is 0 or above 256.
    pub fn linear(n: usize) -> Result<Self> {
        if n == 0 || n > MAX_PALETTE_ENTRIES {
            return Err(Error::InvalidParameter(format!(
                "linear palette size must be in 1..=256, got {n}"
            )));
        }
        let colors = (0..n)
            .map(|i| {
                let v = if n == 1 { 0 } else { (i * 255 / (n - 1)) as u8 };
                RgbaQuad::gray(v)
            })
            .collect();
        Ok(Self { colors })
    }

    /// Get the number of colors
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get a color by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<RgbaQuad> {
        self.colors.get(index).copied()
    }

    /// Get a color by index as a packed truecolor value.
    #[inline]
    pub fn entry_packed(&self, index: usize) -> Option<u32> {
        self.get(index).map(RgbaQuad::to_packed)
    }

    /// Add a color to the palette, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PaletteFull`] if the palette already has 256 entries.
    pub fn add_color(&mut self, color: RgbaQuad) -> Result<usize> {
        if self.colors.len() >= MAX_PALETTE_ENTRIES {
            return Err(Error::PaletteFull(MAX_PALETTE_ENTRIES));
        }
        self.colors.push(color);
        Ok(self.colors.len() - 1)
    }

    /// Add an RGB color
    pub fn add_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<usize> {
        self.add_color(RgbaQuad::rgb(r, g, b))
    }

    /// Add an RGBA color
    pub fn add_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) -> Result<usize> {
        self.add_color(RgbaQuad::new(r, g, b, a))
    }

    /// Set a color at a specific index
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len()`.
    pub fn set_color(&mut self, index: usize, color: RgbaQuad) -> Result<()> {
        let len = self.colors.len();
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = color;
        Ok(())
    }

    /// Find the entry closest to an RGB triple.
    ///
    /// Distance is squared Euclidean over r, g, b; the lowest index wins
    /// ties. Returns `None` for an empty palette.
    pub fn find_nearest(&self, r: u8, g: u8, b: u8) -> Option<usize> {
        self.find_nearest_excluding(r, g, b, None)
    }

    /// Like [`find_nearest`](Self::find_nearest), but never returns `skip`
    /// unless it is the only entry.
    pub fn find_nearest_excluding(
        &self,
        r: u8,
        g: u8,
        b: u8,
        skip: Option<usize>,
    ) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (i, c) in self.colors.iter().enumerate() {
            if Some(i) == skip {
                continue;
            }
            let d = c.distance_sq(r, g, b);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
                if d == 0 {
                    break;
                }
            }
        }
        match best {
            Some((i, _)) => Some(i),
            None if !self.colors.is_empty() => Some(0),
            None => None,
        }
    }

    /// Get all colors as a slice
    pub fn colors(&self) -> &[RgbaQuad] {
        &self.colors
    }
}
