//! Transparent color fixup (alpha bleeding)
//!
//! Fully transparent pixels often hold black or stale color. Filters that
//! ignore alpha (bilinear scaling of premultiplied data, mipmapping) then
//! pull that color into visible edges as dark fringes. The fixup replaces
//! the color of every alpha-0 pixel with the average color of its
//! non-transparent 3x3 neighbors, leaving its alpha at 0.
//!
//! The pass writes in place, yet never observes its own writes: only
//! alpha-0 pixels are written and they stay alpha-0, while only pixels with
//! alpha > 0 are read. The result is therefore identical to reading a
//! pre-pass snapshot and independent of scan order.

use crate::{FilterError, FilterResult};
use rasterkit_core::{Pix, PixMut, PixelFormat, color};

/// Channel access for one bleedable pixel format.
trait Bleed {
    /// Alpha of a packed pixel.
    fn alpha(pixel: u32) -> u8;
    /// Accumulate the color channels of `pixel` into `sum`.
    fn accumulate(sum: &mut [u32; 3], pixel: u32);
    /// Compose a fully transparent pixel from averaged channels.
    fn transparent(avg: [u32; 3]) -> u32;
}

struct RgbaBleed;

impl Bleed for RgbaBleed {
    #[inline]
    fn alpha(pixel: u32) -> u8 {
        color::alpha(pixel)
    }

    #[inline]
    fn accumulate(sum: &mut [u32; 3], pixel: u32) {
        let (r, g, b) = color::extract_rgb(pixel);
        sum[0] += r as u32;
        sum[1] += g as u32;
        sum[2] += b as u32;
    }

    #[inline]
    fn transparent(avg: [u32; 3]) -> u32 {
        color::compose_rgba(avg[0] as u8, avg[1] as u8, avg[2] as u8, 0)
    }
}

struct GrayBleed;

impl Bleed for GrayBleed {
    #[inline]
    fn alpha(pixel: u32) -> u8 {
        color::gray_alpha(pixel)
    }

    #[inline]
    fn accumulate(sum: &mut [u32; 3], pixel: u32) {
        sum[0] += color::gray_value(pixel) as u32;
    }

    #[inline]
    fn transparent(avg: [u32; 3]) -> u32 {
        color::compose_gray(avg[0] as u8, 0)
    }
}

/// Replace the color of fully transparent pixels with the average color
/// of their non-transparent neighbors.
///
/// For each pixel with alpha exactly 0, the in-bounds pixels of its 3x3
/// neighborhood (center excluded) with alpha > 0 are averaged channel by
/// channel using integer division by their count. Corners see at most 3
/// neighbors, edges 5, interior pixels 8. Pixels without such a neighbor
/// are left unchanged. Alpha is never modified.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedFormat`] for indexed images, whose
/// pixels carry an index rather than a color.
pub fn fixup_transparent_colors(pix: &mut PixMut) -> FilterResult<()> {
    log::debug!(
        "fixup_transparent_colors: {}x{} {}",
        pix.width(),
        pix.height(),
        pix.format()
    );
    let fixed = match pix.format() {
        PixelFormat::Rgba => bleed::<RgbaBleed>(pix),
        PixelFormat::GrayAlpha => bleed::<GrayBleed>(pix),
        PixelFormat::Indexed => {
            return Err(FilterError::UnsupportedFormat {
                expected: "rgba or gray-alpha",
                actual: PixelFormat::Indexed,
            });
        }
    };
    log::trace!("fixup_transparent_colors: {fixed} pixels recolored");
    Ok(())
}

/// Copying variant of [`fixup_transparent_colors`].
///
/// # Errors
///
/// See [`fixup_transparent_colors`].
pub fn fixup_transparent_colors_copy(pix: &Pix) -> FilterResult<Pix> {
    let mut out = pix.to_mut();
    fixup_transparent_colors(&mut out)?;
    Ok(out.into())
}

/// Bleed pass for one format; returns the number of recolored pixels.
fn bleed<B: Bleed>(pix: &mut PixMut) -> usize {
    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let data = pix.data_mut();
    let mut fixed = 0;

    for y in 0..h {
        let (v0, v1) = (y.saturating_sub(1), (y + 1).min(h - 1));
        for x in 0..w {
            if B::alpha(data[y * w + x]) != 0 {
                continue;
            }
            let (u0, u1) = (x.saturating_sub(1), (x + 1).min(w - 1));

            let mut sum = [0u32; 3];
            let mut count = 0u32;
            for v in v0..=v1 {
                for u in u0..=u1 {
                    let n = data[v * w + u];
                    // The center has alpha 0 and is skipped here too
                    if B::alpha(n) > 0 {
                        B::accumulate(&mut sum, n);
                        count += 1;
                    }
                }
            }

            if count > 0 {
                data[y * w + x] = B::transparent(sum.map(|s| s / count));
                fixed += 1;
            }
        }
    }
    fixed
}
