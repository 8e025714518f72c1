//! Image resizing
//!
//! Fills a pre-allocated destination from a source of the same pixel
//! format, using nearest-neighbor sampling or bilinear interpolation.
//!
//! | Rust function | Behavior |
//! |---|---|
//! | `resize` | resample `src` into an existing `dst` |
//! | `resize_to_size` | allocate a `width x height` destination, then resample |
//!
//! Bilinear interpolation uses the pixel-center convention and clamps to
//! the source edges, so no source pixel outside the buffer is ever read.
//! Indexed images are interpolated as truecolor through the palette and
//! re-quantized with a [`NearestIndex`] lookup.

use crate::interp::{ColorModel, GrayAlphaModel, IndexedModel, RgbaModel};
use crate::{TransformError, TransformResult};
use rasterkit_core::{NearestIndex, Palette, Pix, PixMut, PixelFormat};

/// Resampling method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResizeMethod {
    /// Copy the closest source pixel (format-preserving, no blending)
    #[default]
    NearestNeighbor,
    /// Blend the four nearest source pixels by fractional distance
    Bilinear,
}

/// Resample `src` into `dst`.
///
/// `dst` must already have the target size and the same pixel format as
/// `src`. `palette` and `lookup` are only consulted for indexed images
/// resampled with [`ResizeMethod::Bilinear`]; for every other combination
/// they may be `None`.
///
/// A zero-sized destination is left untouched, and so is `dst` when an
/// error is returned.
///
/// # Errors
///
/// - [`TransformError::FormatMismatch`] if the formats differ
/// - [`TransformError::EmptySource`] if `src` is empty but `dst` is not
/// - [`TransformError::PaletteRequired`] / [`TransformError::LookupRequired`]
///   for indexed bilinear resampling without a palette or lookup
/// - [`TransformError::Core`] if a source index is missing from the palette
/// - [`TransformError::InvalidLookup`] if the lookup returns an index
///   outside the palette
pub fn resize(
    src: &Pix,
    dst: &mut PixMut,
    method: ResizeMethod,
    palette: Option<&Palette>,
    lookup: Option<&dyn NearestIndex>,
) -> TransformResult<()> {
    if src.format() != dst.format() {
        return Err(TransformError::FormatMismatch {
            src: src.format(),
            dst: dst.format(),
        });
    }

    log::debug!(
        "resize: {}x{} -> {}x{} ({}, {:?})",
        src.width(),
        src.height(),
        dst.width(),
        dst.height(),
        src.format(),
        method
    );

    if dst.is_empty() {
        log::trace!("resize: empty destination, nothing to do");
        return Ok(());
    }
    if src.is_empty() {
        return Err(TransformError::EmptySource {
            width: src.width(),
            height: src.height(),
        });
    }

    match method {
        ResizeMethod::NearestNeighbor => {
            resize_nearest(src, dst);
            Ok(())
        }
        ResizeMethod::Bilinear => match src.format() {
            PixelFormat::Rgba => resize_bilinear(src, dst, &RgbaModel),
            PixelFormat::GrayAlpha => resize_bilinear(src, dst, &GrayAlphaModel),
            PixelFormat::Indexed => {
                let palette =
                    palette.ok_or(TransformError::PaletteRequired("indexed bilinear resize"))?;
                let lookup =
                    lookup.ok_or(TransformError::LookupRequired("indexed bilinear resize"))?;
                resize_bilinear(src, dst, &IndexedModel::new(palette, lookup))
            }
        },
    }
}

/// Allocate a `width x height` image of the source's format and resample
/// `src` into it.
///
/// # Errors
///
/// See [`resize`].
pub fn resize_to_size(
    src: &Pix,
    width: u32,
    height: u32,
    method: ResizeMethod,
    palette: Option<&Palette>,
    lookup: Option<&dyn NearestIndex>,
) -> TransformResult<Pix> {
    let mut dst = PixMut::new(width, height, src.format())?;
    resize(src, &mut dst, method, palette, lookup)?;
    Ok(dst.into())
}

/// Map every destination coordinate along one axis to its nearest-neighbor
/// source coordinate: `floor(d * src_len / dst_len)`.
fn nearest_axis(dst_len: u32, src_len: u32) -> Vec<u32> {
    let ratio = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| ((d as f64 * ratio).floor() as u32).min(src_len - 1))
        .collect()
}

/// Nearest-neighbor resampling. Both buffers are non-empty.
fn resize_nearest(src: &Pix, dst: &mut PixMut) {
    let xmap = nearest_axis(dst.width(), src.width());
    let ymap = nearest_axis(dst.height(), src.height());

    for (y, &sy) in ymap.iter().enumerate() {
        let src_row = src.row_data(sy);
        let dst_row = dst.row_data_mut(y as u32);
        for (d, &sx) in dst_row.iter_mut().zip(&xmap) {
            *d = src_row[sx as usize];
        }
    }
}

/// Source sampling position along one axis for bilinear interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSample {
    /// Lower source coordinate
    s0: u32,
    /// Upper source coordinate, clamped to the last pixel
    s1: u32,
    /// Fractional distance from `s0`
    t: f64,
}

/// Compute bilinear sample positions along one axis using the
/// pixel-center convention: `s = ((d + 0.5) / dst_len) * src_len - 0.5`,
/// with negative positions clamped to 0.
fn bilinear_axis(dst_len: u32, src_len: u32) -> Vec<AxisSample> {
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let n = (0.5 + d as f64) / dst_len as f64;
            let s = (n * src_len as f64 - 0.5).max(0.0);
            let s0 = (s.floor() as u32).min(last);
            let s1 = (s0 + 1).min(last);
            AxisSample {
                s0,
                s1,
                t: s - s0 as f64,
            }
        })
        .collect()
}

/// Bilinear resampling with a per-format color model. Both buffers are
/// non-empty.
///
/// Output goes to a scratch buffer that is copied into `dst` only once
/// every pixel has been produced, so a failing model leaves `dst` as it
/// was.
fn resize_bilinear<M: ColorModel>(src: &Pix, dst: &mut PixMut, model: &M) -> TransformResult<()> {
    let xs = bilinear_axis(dst.width(), src.width());
    let ys = bilinear_axis(dst.height(), src.height());

    let mut out = Vec::with_capacity(xs.len() * ys.len());
    for ay in &ys {
        let row0 = src.row_data(ay.s0);
        let row1 = src.row_data(ay.s1);
        for ax in &xs {
            let (x0, x1) = (ax.s0 as usize, ax.s1 as usize);
            let samples = [
                model.load(row0[x0])?,
                model.load(row0[x1])?,
                model.load(row1[x0])?,
                model.load(row1[x1])?,
            ];
            out.push(model.store(model.interpolate(ax.t, ay.t, samples))?);
        }
    }

    dst.data_mut().copy_from_slice(&out);
    Ok(())
}
