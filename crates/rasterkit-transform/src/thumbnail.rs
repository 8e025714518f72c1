//! Thumbnail rendering
//!
//! Renders any buffer into a small opaque truecolor preview, and keeps
//! rendered previews in a [`ThumbnailCache`] owned by the caller.
//!
//! The source is fitted inside the thumbnail preserving its aspect ratio
//! and centered. Sampling is nearest-neighbor at `(x * scale, y * scale)`.
//! Images with alpha are composited over a gray checkerboard; images
//! without alpha are painted opaque over a flat gray background.

use crate::{TransformError, TransformResult};
use rasterkit_core::{Palette, Pix, PixMut, PixelFormat, color};
use std::collections::HashMap;
use std::hash::Hash;

/// Default thumbnail width
pub const THUMBNAIL_WIDTH: u32 = 32;
/// Default thumbnail height
pub const THUMBNAIL_HEIGHT: u32 = 32;

/// Flat background gray, also the dark checkerboard cell
const BACKGROUND_DARK: u8 = 128;
/// Light checkerboard cell
const BACKGROUND_LIGHT: u8 = 192;

/// Options for [`render_thumbnail`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThumbnailOptions {
    /// Thumbnail width in pixels
    pub width: u32,
    /// Thumbnail height in pixels
    pub height: u32,
    /// Composite over a checkerboard, treating transparent pixels as such.
    /// When false, every sample is painted opaque.
    pub has_alpha: bool,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            width: THUMBNAIL_WIDTH,
            height: THUMBNAIL_HEIGHT,
            has_alpha: true,
        }
    }
}

impl ThumbnailOptions {
    /// Create options with a specific size
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set whether the source is composited with its alpha
    pub fn has_alpha(mut self, has_alpha: bool) -> Self {
        self.has_alpha = has_alpha;
        self
    }
}

/// Placement of the fitted source inside the thumbnail.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fit {
    /// Source pixels per thumbnail pixel
    scale: f64,
    /// Fitted width
    w: u32,
    /// Fitted height
    h: u32,
    /// Left offset
    x1: u32,
    /// Top offset
    y1: u32,
}

fn fit(src_w: u32, src_h: u32, tw: u32, th: u32) -> Fit {
    let sx = src_w as f64 / tw as f64;
    let sy = src_h as f64 / th as f64;
    let scale = sx.max(sy);
    let w = ((src_w as f64 / scale) as u32).min(tw);
    let h = ((src_h as f64 / scale) as u32).min(th);
    Fit {
        scale,
        w,
        h,
        x1: (tw / 2).saturating_sub(w / 2),
        y1: (th / 2).saturating_sub(h / 2),
    }
}

/// Fill `pix` with a checkerboard of `width/4 x height/4` cells.
fn draw_checkerboard(pix: &mut PixMut) {
    let cw = (pix.width() / 4).max(1);
    let ch = (pix.height() / 4).max(1);
    for y in 0..pix.height() {
        let row = pix.row_data_mut(y);
        for (x, d) in row.iter_mut().enumerate() {
            let cell = x as u32 / cw + y / ch;
            let v = if cell % 2 == 0 {
                BACKGROUND_LIGHT
            } else {
                BACKGROUND_DARK
            };
            *d = color::compose_rgb(v, v, v);
        }
    }
}

/// Alpha-composite one channel of `front` over an opaque `back`.
#[inline]
fn blend_channel(back: u8, front: u8, alpha: u8) -> u8 {
    let b = back as i32;
    let f = front as i32;
    color::clamp_channel(b + (f - b) * alpha as i32 / 255)
}

/// Resolve a source pixel to the opaque color painted over `back`, or
/// `None` when nothing is painted.
fn shade(
    pixel: u32,
    back: u32,
    format: PixelFormat,
    palette: Option<&Palette>,
    has_alpha: bool,
) -> Option<u32> {
    match format {
        PixelFormat::Rgba => {
            let (r, g, b, a) = color::extract_rgba(pixel);
            if !has_alpha {
                return Some(color::compose_rgb(r, g, b));
            }
            let (br, bg, bb) = color::extract_rgb(back);
            Some(color::compose_rgb(
                blend_channel(br, r, a),
                blend_channel(bg, g, a),
                blend_channel(bb, b, a),
            ))
        }
        PixelFormat::GrayAlpha => {
            let v = color::gray_value(pixel);
            let v = if has_alpha {
                blend_channel(color::red(back), v, color::gray_alpha(pixel))
            } else {
                v
            };
            Some(color::compose_rgb(v, v, v))
        }
        PixelFormat::Indexed => {
            if has_alpha && pixel == 0 {
                return None;
            }
            let palette = palette?;
            let last = palette.len().checked_sub(1)?;
            let entry = palette.get((pixel as usize).min(last))?;
            Some(color::compose_rgb(entry.red, entry.green, entry.blue))
        }
    }
}

/// Render a thumbnail of `pix`.
///
/// The output is an opaque truecolor image of `options.width x
/// options.height`. Indexed sources resolve through `palette`; index 0 is
/// treated as transparent when `options.has_alpha` is set, and indices
/// beyond the palette use its last entry. An empty source yields only the
/// background.
///
/// # Errors
///
/// - [`TransformError::InvalidParameters`] for a zero thumbnail size
/// - [`TransformError::PaletteRequired`] for an indexed source without a
///   palette
pub fn render_thumbnail(
    pix: &Pix,
    palette: Option<&Palette>,
    options: &ThumbnailOptions,
) -> TransformResult<Pix> {
    let (tw, th) = (options.width, options.height);
    if tw == 0 || th == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "thumbnail size must be non-zero, got {tw}x{th}"
        )));
    }
    let format = pix.format();
    if format == PixelFormat::Indexed && palette.is_none_or(Palette::is_empty) {
        return Err(TransformError::PaletteRequired("indexed thumbnail"));
    }

    log::debug!(
        "thumbnail: {}x{} {} -> {}x{}",
        pix.width(),
        pix.height(),
        format,
        tw,
        th
    );

    let mut out = PixMut::new(tw, th, PixelFormat::Rgba)?;
    if options.has_alpha {
        draw_checkerboard(&mut out);
    } else {
        out.fill(color::compose_rgb(
            BACKGROUND_DARK,
            BACKGROUND_DARK,
            BACKGROUND_DARK,
        ));
    }
    if pix.is_empty() {
        return Ok(out.into());
    }

    let f = fit(pix.width(), pix.height(), tw, th);
    let (last_x, last_y) = (pix.width() - 1, pix.height() - 1);
    for y in 0..f.h {
        let sy = ((y as f64 * f.scale) as u32).min(last_y);
        for x in 0..f.w {
            let sx = ((x as f64 * f.scale) as u32).min(last_x);
            let (dx, dy) = (f.x1 + x, f.y1 + y);
            let back = out.get_pixel_unchecked(dx, dy);
            let pixel = pix.get_pixel_unchecked(sx, sy);
            if let Some(c) = shade(pixel, back, format, palette, options.has_alpha) {
                out.set_pixel_unchecked(dx, dy, c);
            }
        }
    }

    Ok(out.into())
}

/// Cache of rendered thumbnails keyed by a caller-chosen handle.
///
/// The cache never observes changes to the images it was rendered from;
/// call [`invalidate`](Self::invalidate) when the image behind a key
/// changes.
#[derive(Debug, Clone)]
pub struct ThumbnailCache<K> {
    options: ThumbnailOptions,
    entries: HashMap<K, Pix>,
}

impl<K: Eq + Hash> Default for ThumbnailCache<K> {
    fn default() -> Self {
        Self::new(ThumbnailOptions::default())
    }
}

impl<K: Eq + Hash> ThumbnailCache<K> {
    /// Create an empty cache rendering with `options`.
    pub fn new(options: ThumbnailOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
        }
    }

    /// Options used for every render.
    pub fn options(&self) -> &ThumbnailOptions {
        &self.options
    }

    /// Return the cached thumbnail for `key`, rendering it from `pix` on a
    /// miss.
    ///
    /// # Errors
    ///
    /// See [`render_thumbnail`]. Nothing is cached on error.
    pub fn get_or_render(
        &mut self,
        key: K,
        pix: &Pix,
        palette: Option<&Palette>,
    ) -> TransformResult<Pix> {
        if let Some(thumb) = self.entries.get(&key) {
            log::trace!("thumbnail cache: hit");
            return Ok(thumb.clone());
        }
        log::trace!("thumbnail cache: miss");
        let thumb = render_thumbnail(pix, palette, &self.options)?;
        self.entries.insert(key, thumb.clone());
        Ok(thumb)
    }

    /// Cached thumbnail for `key`, if any.
    pub fn get(&self, key: &K) -> Option<&Pix> {
        self.entries.get(key)
    }

    /// Drop the thumbnail for `key`. Returns whether one was cached.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every cached thumbnail.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached thumbnails.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
