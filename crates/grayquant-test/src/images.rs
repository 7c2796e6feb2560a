//! Synthetic test images
//!
//! Deterministic generators for the gray and RGB inputs used by the
//! regression tests.

use crate::error::TestResult;
use grayquant_core::{Pix, PixColormap, PixMut, PixelDepth, color};

/// Build an 8 bpp image from a per-pixel function.
pub fn gray_from_fn(w: u32, h: u32, f: impl Fn(u32, u32) -> u8) -> TestResult<Pix> {
    let mut pm = PixMut::new(w, h, PixelDepth::Bit8)?;
    for y in 0..h {
        for x in 0..w {
            pm.set_pixel_unchecked(x, y, f(x, y) as u32);
        }
    }
    Ok(pm.into())
}

/// 8 bpp image where every pixel is `val`.
pub fn uniform_gray(w: u32, h: u32, val: u8) -> TestResult<Pix> {
    gray_from_fn(w, h, |_, _| val)
}

/// 8 bpp horizontal ramp: pixel (x, y) has value `x mod 256`.
pub fn horizontal_ramp(w: u32, h: u32) -> TestResult<Pix> {
    gray_from_fn(w, h, |x, _| (x % 256) as u8)
}

/// 8 bpp image whose even rows are `even` and odd rows are `odd`.
pub fn alternating_rows(w: u32, h: u32, even: u8, odd: u8) -> TestResult<Pix> {
    gray_from_fn(w, h, |_, y| if y % 2 == 0 { even } else { odd })
}

/// Linear congruential generator for reproducible noise.
struct Lcg(u32);

impl Lcg {
    fn next_byte(&mut self) -> u8 {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12345);
        ((self.0 >> 16) & 0xff) as u8
    }
}

/// 8 bpp pseudo-random noise; the same seed gives the same image.
pub fn gray_noise(w: u32, h: u32, seed: u32) -> TestResult<Pix> {
    let mut rng = Lcg(seed);
    let mut pm = PixMut::new(w, h, PixelDepth::Bit8)?;
    for y in 0..h {
        for x in 0..w {
            pm.set_pixel_unchecked(x, y, rng.next_byte() as u32);
        }
    }
    Ok(pm.into())
}

/// 32 bpp pseudo-random RGB noise.
pub fn rgb_noise(w: u32, h: u32, seed: u32) -> TestResult<Pix> {
    let mut rng = Lcg(seed);
    let mut pm = PixMut::new(w, h, PixelDepth::Bit32)?;
    for y in 0..h {
        for x in 0..w {
            let (r, g, b) = (rng.next_byte(), rng.next_byte(), rng.next_byte());
            pm.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
        }
    }
    Ok(pm.into())
}

/// 32 bpp image where every pixel is `(r, g, b)`.
pub fn uniform_rgb(w: u32, h: u32, r: u8, g: u8, b: u8) -> TestResult<Pix> {
    let mut pm = PixMut::new(w, h, PixelDepth::Bit32)?;
    let pixel = color::compose_rgb(r, g, b);
    for y in 0..h {
        for x in 0..w {
            pm.set_pixel_unchecked(x, y, pixel);
        }
    }
    Ok(pm.into())
}

/// Indexed image of the given depth with `index(x, y)` as pixel values
/// and `cmap` attached.
pub fn indexed(
    w: u32,
    h: u32,
    depth: PixelDepth,
    cmap: PixColormap,
    index: impl Fn(u32, u32) -> u32,
) -> TestResult<Pix> {
    let mut pm = PixMut::new(w, h, depth)?;
    for y in 0..h {
        for x in 0..w {
            pm.set_pixel_unchecked(x, y, index(x, y));
        }
    }
    pm.set_colormap(Some(cmap))?;
    Ok(pm.into())
}
