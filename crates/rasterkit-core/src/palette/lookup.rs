//! Nearest palette index lookup
//!
//! [`NearestIndex`] is the capability the resampler uses to re-quantize an
//! interpolated color back into a palette index. [`RgbMap`] is a
//! precomputed table implementation with 5 bits per channel.

use super::Palette;
use crate::error::{Error, Result};

/// Bits kept per channel by [`RgbMap`].
const RGBMAP_BITS: u32 = 5;
/// Entries per channel axis of the [`RgbMap`] table.
const RGBMAP_SIDE: usize = 1 << RGBMAP_BITS;

/// Maps an RGB triple to the closest palette index.
///
/// Implementations decide the distance metric and tie-break policy.
pub trait NearestIndex {
    /// Return the palette index closest to `(r, g, b)`.
    fn map_color(&self, r: u8, g: u8, b: u8) -> u32;
}

impl NearestIndex for Palette {
    fn map_color(&self, r: u8, g: u8, b: u8) -> u32 {
        self.find_nearest(r, g, b).unwrap_or(0) as u32
    }
}

impl<F> NearestIndex for F
where
    F: Fn(u8, u8, u8) -> u32,
{
    fn map_color(&self, r: u8, g: u8, b: u8) -> u32 {
        self(r, g, b)
    }
}

/// Precomputed RGB to palette index table
///
/// Each channel is reduced to its top 5 bits, so the table has
/// 32 x 32 x 32 entries. A reduced channel `c` is expanded back to 8 bits
/// as `(c << 3) | (c >> 2)` when searching the palette.
///
/// An optional mask index is never produced (unless it is the palette's
/// only entry), so opaque colors do not re-quantize to the transparent
/// entry.
#[derive(Debug, Clone)]
pub struct RgbMap {
    table: Vec<u8>,
    mask_index: Option<usize>,
    palette_len: usize,
}

impl RgbMap {
    /// Build a table for `palette`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the palette is empty.
    pub fn new(palette: &Palette, mask_index: Option<usize>) -> Result<Self> {
        let mut map = RgbMap {
            table: vec![0u8; RGBMAP_SIDE * RGBMAP_SIDE * RGBMAP_SIDE],
            mask_index,
            palette_len: 0,
        };
        map.regenerate(palette)?;
        Ok(map)
    }

    /// Rebuild the table after the palette changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the palette is empty.
    pub fn regenerate(&mut self, palette: &Palette) -> Result<()> {
        if palette.is_empty() {
            return Err(Error::InvalidParameter(
                "cannot build an rgb map for an empty palette".into(),
            ));
        }
        log::trace!(
            "rgbmap: regenerating for {} entries, mask {:?}",
            palette.len(),
            self.mask_index
        );

        for r in 0..RGBMAP_SIDE {
            for g in 0..RGBMAP_SIDE {
                for b in 0..RGBMAP_SIDE {
                    let idx = palette
                        .find_nearest_excluding(expand(r), expand(g), expand(b), self.mask_index)
                        .unwrap_or(0);
                    self.table[table_offset(r, g, b)] = idx as u8;
                }
            }
        }
        self.palette_len = palette.len();
        Ok(())
    }

    /// Index excluded from matches, if any.
    pub fn mask_index(&self) -> Option<usize> {
        self.mask_index
    }

    /// Number of palette entries the table was built from.
    pub fn palette_len(&self) -> usize {
        self.palette_len
    }
}

impl NearestIndex for RgbMap {
    #[inline]
    fn map_color(&self, r: u8, g: u8, b: u8) -> u32 {
        let shift = 8 - RGBMAP_BITS;
        let i = table_offset(
            (r >> shift) as usize,
            (g >> shift) as usize,
            (b >> shift) as usize,
        );
        self.table[i] as u32
    }
}

#[inline]
fn table_offset(r: usize, g: usize, b: usize) -> usize {
    (r * RGBMAP_SIDE + g) * RGBMAP_SIDE + b
}

/// Expand a reduced channel back to 8 bits.
#[inline]
fn expand(c: usize) -> u8 {
    ((c << 3) | (c >> 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RgbaQuad;

    fn test_palette() -> Palette {
        Palette::from_colors(vec![
            RgbaQuad::new(0, 0, 0, 0),
            RgbaQuad::rgb(0, 0, 0),
            RgbaQuad::rgb(255, 255, 255),
            RgbaQuad::rgb(200, 40, 40),
            RgbaQuad::rgb(40, 200, 40),
        ])
        .unwrap()
    }

    #[test]
    fn test_expand() {
        assert_eq!(expand(0), 0);
        assert_eq!(expand(31), 255);
        assert_eq!(expand(16), 132);
    }

    #[test]
    fn test_rgbmap_matches_palette_on_grid() {
        let pal = test_palette();
        let map = RgbMap::new(&pal, None).unwrap();
        for r in (0..32usize).step_by(3) {
            for g in (0..32usize).step_by(5) {
                for b in (0..32usize).step_by(7) {
                    let (r8, g8, b8) = (expand(r), expand(g), expand(b));
                    let expected = pal.find_nearest(r8, g8, b8).unwrap() as u32;
                    assert_eq!(map.map_color(r8, g8, b8), expected);
                }
            }
        }
    }

    #[test]
    fn test_rgbmap_skips_mask_index() {
        let pal = test_palette();
        let map = RgbMap::new(&pal, Some(0)).unwrap();
        // Pure black is closest to both 0 and 1; the mask entry is skipped
        assert_eq!(map.map_color(0, 0, 0), 1);
        for v in (0..=255u8).step_by(17) {
            assert_ne!(map.map_color(v, v / 2, 255 - v), 0);
        }
        assert_eq!(map.mask_index(), Some(0));
        assert_eq!(map.palette_len(), 5);
    }

    #[test]
    fn test_rgbmap_regenerate() {
        let mut pal = test_palette();
        let mut map = RgbMap::new(&pal, Some(0)).unwrap();
        assert_eq!(map.map_color(255, 255, 255), 2);
        pal.set_color(2, RgbaQuad::rgb(0, 0, 255)).unwrap();
        map.regenerate(&pal).unwrap();
        assert_ne!(map.map_color(255, 255, 255), 2);
        assert_eq!(map.map_color(0, 0, 255), 2);
    }

    #[test]
    fn test_rgbmap_empty_palette() {
        assert!(RgbMap::new(&Palette::new(), None).is_err());
    }

    #[test]
    fn test_closure_and_palette_lookup() {
        let pal = test_palette();
        assert_eq!(pal.map_color(210, 30, 50), 3);
        let constant = |_: u8, _: u8, _: u8| 4u32;
        assert_eq!(constant.map_color(1, 2, 3), 4);
    }
}
