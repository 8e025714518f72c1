//! Transparent color fixup regression test
//!
//! Checks neighbor averaging at interior, edge and corner pixels, and
//! compares the in-place pass against a reference that reads every
//! neighbor from an untouched copy of the input.
//!
//! Run with:
//! ```
//! cargo test -p rasterkit-filter --test fixup_reg -- --nocapture
//! ```

use rasterkit_core::{Pix, PixMut, PixelFormat, color};
use rasterkit_filter::{fixup_transparent_colors, fixup_transparent_colors_copy};
use rasterkit_test::RegParams;
use rasterkit_transform::{ResizeMethod, resize_to_size};

/// Deterministic pseudo-random image where roughly half the pixels are
/// fully transparent.
fn speckled(w: u32, h: u32, format: PixelFormat, seed: u32) -> Pix {
    let mut state = seed;
    let mut pix = PixMut::new(w, h, format).expect("speckled image");
    for p in pix.data_mut() {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let v = state >> 8;
        let alpha = if state & 0x80 == 0 { 0 } else { (v & 0xff) as u8 | 1 };
        *p = match format {
            PixelFormat::GrayAlpha => color::compose_gray((v >> 8) as u8, alpha),
            _ => color::compose_rgba((v >> 16) as u8, (v >> 8) as u8, v as u8, alpha),
        };
    }
    pix.into()
}

/// Average every alpha-0 pixel from an unmodified copy of the input.
fn snapshot_reference(src: &Pix) -> Pix {
    let (w, h) = (src.width() as i64, src.height() as i64);
    let gray = src.format() == PixelFormat::GrayAlpha;
    let alpha = |p: u32| {
        if gray {
            color::gray_alpha(p)
        } else {
            color::alpha(p)
        }
    };

    let mut out = src.to_mut();
    for y in 0..h {
        for x in 0..w {
            if alpha(src.get_pixel(x as u32, y as u32).unwrap()) != 0 {
                continue;
            }
            let mut sum = [0u32; 3];
            let mut n = 0u32;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (u, v) = (x + dx, y + dy);
                    if (dx, dy) == (0, 0) || u < 0 || v < 0 || u >= w || v >= h {
                        continue;
                    }
                    let p = src.get_pixel(u as u32, v as u32).unwrap();
                    if alpha(p) == 0 {
                        continue;
                    }
                    if gray {
                        sum[0] += color::gray_value(p) as u32;
                    } else {
                        let (r, g, b) = color::extract_rgb(p);
                        sum[0] += r as u32;
                        sum[1] += g as u32;
                        sum[2] += b as u32;
                    }
                    n += 1;
                }
            }
            if n == 0 {
                continue;
            }
            let fixed = if gray {
                color::compose_gray((sum[0] / n) as u8, 0)
            } else {
                color::compose_rgba((sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8, 0)
            };
            out.set_pixel(x as u32, y as u32, fixed).unwrap();
        }
    }
    out.into()
}

#[test]
fn fixup_reg() {
    let mut rp = RegParams::new("fixup");

    // --- Test 1: no alpha-0 pixels means no change ---
    let mut opaque = PixMut::new(4, 3, PixelFormat::Rgba).expect("opaque");
    for (i, p) in opaque.data_mut().iter_mut().enumerate() {
        *p = color::compose_rgba(i as u8, 0, 0, 1 + i as u8);
    }
    let opaque: Pix = opaque.into();
    let out = fixup_transparent_colors_copy(&opaque).expect("fixup opaque");
    rp.compare_pix(&opaque, &out);

    // --- Test 2: edge pixel averages its 5 in-bounds neighbors ---
    let t = color::compose_rgba(0, 0, 0, 0);
    let o = |r: u8| color::compose_rgba(r, 0, 0, 255);
    #[rustfmt::skip]
    let data = [
        o(10), t,     o(20),
        o(30), o(40), o(50),
        o(99), o(99), o(99),
    ];
    let edge = Pix::from_data(3, 3, PixelFormat::Rgba, &data).expect("edge image");
    let out = fixup_transparent_colors_copy(&edge).expect("fixup edge");
    // (10 + 20 + 30 + 40 + 50) / 5
    rp.compare_values(30.0, color::red(out.get_pixel(1, 0).unwrap_or(0)) as f64, 0.0);
    rp.compare_values(0.0, color::alpha(out.get_pixel(1, 0).unwrap_or(1)) as f64, 0.0);

    // --- Test 3: in-place pass equals the snapshot reference ---
    for (i, format) in [PixelFormat::Rgba, PixelFormat::GrayAlpha].into_iter().enumerate() {
        let src = speckled(17, 11, format, 7 + i as u32);
        let expected = snapshot_reference(&src);
        let mut actual = src.to_mut();
        fixup_transparent_colors(&mut actual).expect("fixup in place");
        rp.compare_pix(&expected, &actual.into());
    }

    // --- Test 4: determinism ---
    let src = speckled(9, 9, PixelFormat::Rgba, 42);
    let a = fixup_transparent_colors_copy(&src).expect("fixup a");
    let b = fixup_transparent_colors_copy(&src).expect("fixup b");
    rp.compare_pix(&a, &b);

    // --- Test 5: fixup then bilinear upscale keeps dark color out ---
    let w = color::compose_rgba(255, 255, 255, 255);
    let sprite = Pix::from_data(2, 1, PixelFormat::Rgba, &[w, t]).expect("sprite");
    let fixed = fixup_transparent_colors_copy(&sprite).expect("fixup sprite");
    let big = resize_to_size(&fixed, 4, 1, ResizeMethod::Bilinear, None, None).expect("upscale");
    let min_red = big
        .data()
        .iter()
        .map(|&p| color::red(p))
        .min()
        .unwrap_or(0);
    rp.compare_values(255.0, min_red as f64, 0.0);

    assert!(rp.cleanup(), "fixup regression test failed");
}
