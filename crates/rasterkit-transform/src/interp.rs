//! Color interpolation primitives
//!
//! Scalar and 2x2 bilinear interpolation for each pixel format, plus the
//! [`ColorModel`] strategy the resampler selects once per call.
//!
//! All channel results are truncated toward zero, never rounded, so a
//! blend landing at 169.99999999999997 yields 169 (0xa9) and not 170.
//! Bilinear output stays bit-exact against the reference fixtures only
//! with this truncation.

use crate::{TransformError, TransformResult};
use rasterkit_core::{NearestIndex, Palette, RgbaQuad, color};

/// Linear interpolation: `a * (1 - t) + b * t`.
#[inline]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Interpolate one 8-bit channel, truncating toward zero.
#[inline]
fn lerp_channel(t: f64, a: u8, b: u8) -> u8 {
    color::clamp_channel(lerp(t, a as f64, b as f64) as i32)
}

/// Interpolate two truecolor pixels channel by channel.
#[inline]
pub fn lerp_rgba(t: f64, c0: u32, c1: u32) -> u32 {
    let (r0, g0, b0, a0) = color::extract_rgba(c0);
    let (r1, g1, b1, a1) = color::extract_rgba(c1);
    color::compose_rgba(
        lerp_channel(t, r0, r1),
        lerp_channel(t, g0, g1),
        lerp_channel(t, b0, b1),
        lerp_channel(t, a0, a1),
    )
}

/// Interpolate two grayscale pixels (value and alpha independently).
#[inline]
pub fn lerp_gray(t: f64, c0: u32, c1: u32) -> u32 {
    color::compose_gray(
        lerp_channel(t, color::gray_value(c0), color::gray_value(c1)),
        lerp_channel(t, color::gray_alpha(c0), color::gray_alpha(c1)),
    )
}

/// Bilinear interpolation of four truecolor samples.
///
/// Samples are ordered `[(x0,y0), (x1,y0), (x0,y1), (x1,y1)]`. Each row is
/// interpolated horizontally with `tx`, then the two rows vertically with
/// `ty`.
#[inline]
pub fn bilerp_rgba(tx: f64, ty: f64, samples: [u32; 4]) -> u32 {
    lerp_rgba(
        ty,
        lerp_rgba(tx, samples[0], samples[1]),
        lerp_rgba(tx, samples[2], samples[3]),
    )
}

/// Bilinear interpolation of four grayscale samples.
///
/// Same sample order as [`bilerp_rgba`].
#[inline]
pub fn bilerp_gray(tx: f64, ty: f64, samples: [u32; 4]) -> u32 {
    lerp_gray(
        ty,
        lerp_gray(tx, samples[0], samples[1]),
        lerp_gray(tx, samples[2], samples[3]),
    )
}

/// Build the truecolor sample used to interpolate an indexed pixel.
///
/// Color comes from the palette entry; alpha is 0 for index 0 and 255
/// for every other index, whatever the entry's own alpha is.
#[inline]
pub fn indexed_sample(index: u32, entry: RgbaQuad) -> u32 {
    let alpha = if index == 0 { 0 } else { 255 };
    color::compose_rgba(entry.red, entry.green, entry.blue, alpha)
}

/// Strategy for one pixel format.
///
/// `load` turns a source pixel into an interpolation sample, `interpolate`
/// blends four samples and `store` turns the blended sample back into a
/// destination pixel.
pub trait ColorModel {
    /// Convert a source pixel into an interpolation sample.
    fn load(&self, pixel: u32) -> TransformResult<u32>;

    /// Blend four samples ordered `[(x0,y0), (x1,y0), (x0,y1), (x1,y1)]`.
    fn interpolate(&self, tx: f64, ty: f64, samples: [u32; 4]) -> u32;

    /// Convert a blended sample into a destination pixel.
    fn store(&self, sample: u32) -> TransformResult<u32>;
}

/// Truecolor with alpha.
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbaModel;

impl ColorModel for RgbaModel {
    #[inline]
    fn load(&self, pixel: u32) -> TransformResult<u32> {
        Ok(pixel)
    }

    #[inline]
    fn interpolate(&self, tx: f64, ty: f64, samples: [u32; 4]) -> u32 {
        bilerp_rgba(tx, ty, samples)
    }

    #[inline]
    fn store(&self, sample: u32) -> TransformResult<u32> {
        Ok(sample)
    }
}

/// Grayscale with alpha.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayAlphaModel;

impl ColorModel for GrayAlphaModel {
    #[inline]
    fn load(&self, pixel: u32) -> TransformResult<u32> {
        Ok(pixel)
    }

    #[inline]
    fn interpolate(&self, tx: f64, ty: f64, samples: [u32; 4]) -> u32 {
        bilerp_gray(tx, ty, samples)
    }

    #[inline]
    fn store(&self, sample: u32) -> TransformResult<u32> {
        Ok(sample)
    }
}

/// Alpha above which an interpolated indexed pixel is re-quantized;
/// at or below it the pixel becomes index 0.
pub const INDEXED_ALPHA_THRESHOLD: u8 = 127;

/// Palette-indexed pixels, interpolated as truecolor and re-quantized.
pub struct IndexedModel<'a> {
    palette: &'a Palette,
    lookup: &'a dyn NearestIndex,
}

impl<'a> IndexedModel<'a> {
    /// Create a model resolving through `palette` and re-quantizing with
    /// `lookup`.
    pub fn new(palette: &'a Palette, lookup: &'a dyn NearestIndex) -> Self {
        Self { palette, lookup }
    }
}

impl ColorModel for IndexedModel<'_> {
    fn load(&self, pixel: u32) -> TransformResult<u32> {
        let entry = self
            .palette
            .get(pixel as usize)
            .ok_or(rasterkit_core::Error::IndexOutOfBounds {
                index: pixel as usize,
                len: self.palette.len(),
            })?;
        Ok(indexed_sample(pixel, entry))
    }

    #[inline]
    fn interpolate(&self, tx: f64, ty: f64, samples: [u32; 4]) -> u32 {
        bilerp_rgba(tx, ty, samples)
    }

    fn store(&self, sample: u32) -> TransformResult<u32> {
        let (r, g, b, a) = color::extract_rgba(sample);
        if a <= INDEXED_ALPHA_THRESHOLD {
            return Ok(0);
        }
        let index = self.lookup.map_color(r, g, b);
        if index as usize >= self.palette.len() {
            return Err(TransformError::InvalidLookup {
                index,
                len: self.palette.len(),
            });
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(0.0, 10.0, 20.0), 10.0);
        assert_eq!(lerp(1.0, 10.0, 20.0), 20.0);
        assert_eq!(lerp(0.5, 10.0, 20.0), 15.0);
    }

    #[test]
    fn test_lerp_channel_truncates() {
        // Fractions as produced for columns 3 and 5 of a 3 -> 9 upscale
        let t3 = ((0.5 + 3.0) / 9.0) * 3.0 - 0.5;
        let t5 = ((0.5 + 5.0) / 9.0) * 3.0 - 0.5 - 1.0;
        assert_eq!(lerp_channel(t3, 0, 255), 170);
        assert_eq!(lerp_channel(t5, 255, 0), 169);
        assert_eq!(lerp_channel(0.5, 0, 255), 127);
    }

    #[test]
    fn test_lerp_rgba_channels_independent() {
        let c0 = color::compose_rgba(0, 100, 200, 255);
        let c1 = color::compose_rgba(100, 100, 0, 0);
        let c = lerp_rgba(0.25, c0, c1);
        assert_eq!(color::extract_rgba(c), (25, 100, 150, 191));
    }

    #[test]
    fn test_lerp_gray() {
        let c = lerp_gray(0.5, color::compose_gray(10, 0), color::compose_gray(20, 255));
        assert_eq!(color::gray_value(c), 15);
        assert_eq!(color::gray_alpha(c), 127);
    }

    #[test]
    fn test_bilerp_gray_uses_all_four_samples() {
        let samples = [
            color::compose_gray(0, 255),
            color::compose_gray(0, 255),
            color::compose_gray(0, 255),
            color::compose_gray(200, 255),
        ];
        let c = bilerp_gray(0.5, 0.5, samples);
        assert_eq!(color::gray_value(c), 50);
        assert_eq!(color::gray_alpha(c), 255);
    }

    #[test]
    fn test_bilerp_rgba_corners() {
        let samples = [0x10203040, 0x50607080, 0x90a0b0c0, 0xd0e0f0ff];
        assert_eq!(bilerp_rgba(0.0, 0.0, samples), samples[0]);
        assert_eq!(bilerp_rgba(0.0, 1.0, samples), samples[2]);
    }

    #[test]
    fn test_indexed_sample_alpha() {
        let entry = RgbaQuad::new(9, 8, 7, 100);
        assert_eq!(indexed_sample(0, entry), color::compose_rgba(9, 8, 7, 0));
        assert_eq!(indexed_sample(3, entry), color::compose_rgba(9, 8, 7, 255));
    }

    #[test]
    fn test_indexed_model_threshold() {
        let pal = Palette::from_colors(vec![
            RgbaQuad::new(0, 0, 0, 0),
            RgbaQuad::rgb(255, 0, 0),
            RgbaQuad::rgb(0, 0, 255),
        ])
        .unwrap();
        let lookup = |_: u8, _: u8, _: u8| 2u32;
        let model = IndexedModel::new(&pal, &lookup);

        assert_eq!(model.store(color::compose_rgba(255, 0, 0, 127)).unwrap(), 0);
        assert_eq!(model.store(color::compose_rgba(255, 0, 0, 128)).unwrap(), 2);
        assert!(model.load(3).is_err());
        assert_eq!(
            model.load(1).unwrap(),
            color::compose_rgba(255, 0, 0, 255)
        );
    }

    #[test]
    fn test_indexed_model_rejects_bad_lookup() {
        let pal = Palette::linear(4).unwrap();
        let lookup = |_: u8, _: u8, _: u8| 4u32;
        let model = IndexedModel::new(&pal, &lookup);
        assert!(matches!(
            model.store(color::compose_rgba(1, 1, 1, 255)),
            Err(TransformError::InvalidLookup { index: 4, len: 4 })
        ));
    }
}
