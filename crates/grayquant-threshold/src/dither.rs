//! Error-diffusion dithering
//!
//! Floyd-Steinberg style dithering of 8 bpp gray to 1 bpp and 2 bpp.
//! The quantization error of each pixel is spread 3/8 to the right,
//! 3/8 below and 1/4 below-right. Pixels within the clip distance of
//! pure black or pure white are assigned without propagating any error,
//! which suppresses "snake" patterns in nearly flat regions.
//!
//! Rows are scanned top to bottom and left to right through two line
//! buffers (current row and next row); the source is never modified.
//! Error that would flow past the right or bottom edge is dropped.

use crate::{QuantError, QuantResult};
use grayquant_core::pix::{get_data_byte, set_line_pixel};
use grayquant_core::{Pix, PixColormap, PixMut, PixelDepth};

/// Default clip distance from black for binary dithering.
///
/// Both binary defaults are 10, twice the 2 bpp defaults.
pub const DEFAULT_CLIP_LOWER_1: i32 = 10;
/// Default clip distance from white for binary dithering.
pub const DEFAULT_CLIP_UPPER_1: i32 = 10;
/// Default clip distance from black for 2 bpp dithering.
pub const DEFAULT_CLIP_LOWER_2: i32 = 5;
/// Default clip distance from white for 2 bpp dithering.
pub const DEFAULT_CLIP_UPPER_2: i32 = 5;

/// Clip distances for dithering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherOptions {
    /// Distance from black (0) within which no error is propagated
    pub lower_clip: i32,
    /// Distance from white (255) within which no error is propagated
    pub upper_clip: i32,
}

impl DitherOptions {
    /// Defaults for dithering to 1 bpp.
    pub const fn binary() -> Self {
        Self {
            lower_clip: DEFAULT_CLIP_LOWER_1,
            upper_clip: DEFAULT_CLIP_UPPER_1,
        }
    }

    /// Defaults for dithering to 2 bpp.
    pub const fn dibit() -> Self {
        Self {
            lower_clip: DEFAULT_CLIP_LOWER_2,
            upper_clip: DEFAULT_CLIP_UPPER_2,
        }
    }

    fn validate(&self) -> QuantResult<()> {
        if !(0..=255).contains(&self.lower_clip) || !(0..=255).contains(&self.upper_clip) {
            return Err(QuantError::InvalidParameters(format!(
                "clip distances ({}, {}) not in [0, 255]",
                self.lower_clip, self.upper_clip
            )));
        }
        Ok(())
    }
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self::binary()
    }
}

/// Output value and error shares produced by one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DitherStep {
    val: u32,
    e38: i32,
    e14: i32,
}

impl DitherStep {
    const fn hard(val: u32) -> Self {
        Self { val, e38: 0, e14: 0 }
    }
}

/// Decide one binary pixel. 1 is black.
fn binary_step(v: i32, lower_clip: i32, upper_clip: i32) -> DitherStep {
    if v > 127 {
        let excess = 255 - v;
        if excess > upper_clip {
            DitherStep {
                val: 0,
                e38: -(3 * excess / 8),
                e14: -(excess / 4),
            }
        } else {
            DitherStep::hard(0)
        }
    } else if v > lower_clip {
        DitherStep {
            val: 1,
            e38: 3 * v / 8,
            e14: v / 4,
        }
    } else {
        DitherStep::hard(1)
    }
}

/// Error shares rounded to nearest, away from zero.
#[inline]
fn rounded_shares(err: i32) -> (i32, i32) {
    if err < 0 {
        ((3 * err - 4) / 8, (err - 2) / 4)
    } else {
        ((3 * err + 4) / 8, (err + 2) / 4)
    }
}

/// Decide one 2 bpp pixel. Targets are 0, 85, 170 and 255 with
/// decision thresholds at 43, 128 and 213.
fn dibit_step(v: i32, lower_clip: i32, upper_clip: i32) -> DitherStep {
    let (val, target) = if v <= lower_clip {
        return DitherStep::hard(0);
    } else if v < 43 {
        (0, 0)
    } else if v < 128 {
        (1, 85)
    } else if v < 213 {
        (2, 170)
    } else if v < 255 - upper_clip {
        (3, 255)
    } else {
        return DitherStep::hard(3);
    };
    let (e38, e14) = rounded_shares(v - target);
    DitherStep { val, e38, e14 }
}

/// Per-value dithering tables: output value, 3/8 share and 1/4 share.
///
/// Built from the same decision rule as the direct routines, so the two
/// forms produce identical output.
#[derive(Debug, Clone)]
pub struct DitherTables {
    val: [u32; 256],
    e38: [i32; 256],
    e14: [i32; 256],
}

impl DitherTables {
    fn build(step: impl Fn(i32) -> DitherStep) -> Self {
        let mut tables = Self {
            val: [0; 256],
            e38: [0; 256],
            e14: [0; 256],
        };
        for i in 0..256 {
            let s = step(i as i32);
            tables.val[i] = s.val;
            tables.e38[i] = s.e38;
            tables.e14[i] = s.e14;
        }
        tables
    }

    /// Tables for dithering to 1 bpp.
    pub fn binary(options: &DitherOptions) -> QuantResult<Self> {
        options.validate()?;
        let (lower, upper) = (options.lower_clip, options.upper_clip);
        Ok(Self::build(|v| binary_step(v, lower, upper)))
    }

    /// Tables for dithering to 2 bpp.
    pub fn dibit(options: &DitherOptions) -> QuantResult<Self> {
        options.validate()?;
        let (lower, upper) = (options.lower_clip, options.upper_clip);
        Ok(Self::build(|v| dibit_step(v, lower, upper)))
    }

    /// Output value for gray value `v`.
    pub fn value(&self, v: u8) -> u32 {
        self.val[v as usize]
    }

    /// Error share sent to the right and lower neighbors.
    pub fn share_38(&self, v: u8) -> i32 {
        self.e38[v as usize]
    }

    /// Error share sent to the lower-right neighbor.
    pub fn share_14(&self, v: u8) -> i32 {
        self.e14[v as usize]
    }

    fn step(&self, v: u8) -> DitherStep {
        let i = v as usize;
        DitherStep {
            val: self.val[i],
            e38: self.e38[i],
            e14: self.e14[i],
        }
    }
}

/// Require 8 bpp and strip any colormap.
fn prepare_source(pixs: &Pix) -> QuantResult<Pix> {
    let d = pixs.depth();
    if d != PixelDepth::Bit8 {
        return Err(QuantError::UnsupportedDepth {
            expected: "8 bpp",
            actual: d.bits(),
        });
    }
    Ok(pixs.remove_colormap_to_gray()?)
}

fn alloc_line(w: usize) -> QuantResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(w)
        .map_err(|_| QuantError::AllocationFailed)?;
    buf.resize(w, 0);
    Ok(buf)
}

fn load_line(pix: &Pix, y: u32, buf: &mut [u8]) {
    let line = pix.row_data(y);
    for (x, b) in buf.iter_mut().enumerate() {
        *b = get_data_byte(line, x as u32) as u8;
    }
}

#[inline]
fn add_clamped(slot: &mut u8, delta: i32) {
    *slot = (*slot as i32 + delta).clamp(0, 255) as u8;
}

/// Scan an 8 bpp image, writing `step(v).val` at `depth` and diffusing
/// the error shares into the line buffers.
fn diffuse(pixs: &Pix, depth: PixelDepth, step: impl Fn(u8) -> DitherStep) -> QuantResult<PixMut> {
    let w = pixs.width();
    let h = pixs.height();
    let mut pixd = PixMut::new(w, h, depth)?;
    pixd.copy_resolution_from(pixs);

    let wu = w as usize;
    let mut cur = alloc_line(wu)?;
    let mut next = alloc_line(wu)?;
    load_line(pixs, 0, &mut next);

    for y in 0..h {
        std::mem::swap(&mut cur, &mut next);
        let last_row = y + 1 == h;
        if !last_row {
            load_line(pixs, y + 1, &mut next);
        }
        let lined = pixd.row_data_mut(y);
        for x in 0..wu {
            let s = step(cur[x]);
            if s.val != 0 {
                set_line_pixel(lined, x as u32, depth, s.val);
            }
            if s.e38 == 0 && s.e14 == 0 {
                continue;
            }
            let has_right = x + 1 < wu;
            if has_right {
                add_clamped(&mut cur[x + 1], s.e38);
            }
            if !last_row {
                add_clamped(&mut next[x], s.e38);
                if has_right {
                    add_clamped(&mut next[x + 1], s.e14);
                }
            }
        }
    }
    Ok(pixd)
}

/// Dither an 8 bpp image to 1 bpp with the default clip distances.
///
/// A colormapped source is first flattened to gray. Output 1 is black.
pub fn dither_to_binary(pixs: &Pix) -> QuantResult<Pix> {
    dither_to_binary_spec(pixs, &DitherOptions::binary())
}

/// Dither an 8 bpp image to 1 bpp with explicit clip distances.
///
/// # Errors
///
/// Returns [`QuantError::UnsupportedDepth`] if the source is not 8 bpp
/// and [`QuantError::InvalidParameters`] if a clip distance is outside
/// `[0, 255]`.
pub fn dither_to_binary_spec(pixs: &Pix, options: &DitherOptions) -> QuantResult<Pix> {
    options.validate()?;
    let pixt = prepare_source(pixs)?;
    let (lower, upper) = (options.lower_clip, options.upper_clip);
    let pixd = diffuse(&pixt, PixelDepth::Bit1, |v| {
        binary_step(v as i32, lower, upper)
    })?;
    Ok(pixd.into())
}

/// Dither to 1 bpp using precomputed [`DitherTables`].
///
/// Output is identical to [`dither_to_binary_spec`] with the same options.
pub fn dither_to_binary_lut(pixs: &Pix, options: &DitherOptions) -> QuantResult<Pix> {
    let tables = DitherTables::binary(options)?;
    let pixt = prepare_source(pixs)?;
    let pixd = diffuse(&pixt, PixelDepth::Bit1, |v| tables.step(v))?;
    Ok(pixd.into())
}

/// Dither an 8 bpp image to 2 bpp with the default clip distances.
///
/// With `cmapflag` a linear 4-entry gray colormap (0, 85, 170, 255) is
/// attached; otherwise the 2 bpp values are the gray levels themselves.
pub fn dither_to_2bpp(pixs: &Pix, cmapflag: bool) -> QuantResult<Pix> {
    dither_to_2bpp_spec(pixs, &DitherOptions::dibit(), cmapflag)
}

/// Dither an 8 bpp image to 2 bpp with explicit clip distances.
pub fn dither_to_2bpp_spec(
    pixs: &Pix,
    options: &DitherOptions,
    cmapflag: bool,
) -> QuantResult<Pix> {
    options.validate()?;
    let pixt = prepare_source(pixs)?;
    let (lower, upper) = (options.lower_clip, options.upper_clip);
    let mut pixd = diffuse(&pixt, PixelDepth::Bit2, |v| {
        dibit_step(v as i32, lower, upper)
    })?;
    if cmapflag {
        pixd.set_colormap(Some(PixColormap::create_linear(2, 4)?))?;
    }
    Ok(pixd.into())
}

/// Dither to 2 bpp using precomputed [`DitherTables`].
pub fn dither_to_2bpp_lut(
    pixs: &Pix,
    options: &DitherOptions,
    cmapflag: bool,
) -> QuantResult<Pix> {
    let tables = DitherTables::dibit(options)?;
    let pixt = prepare_source(pixs)?;
    let mut pixd = diffuse(&pixt, PixelDepth::Bit2, |v| tables.step(v))?;
    if cmapflag {
        pixd.set_colormap(Some(PixColormap::create_linear(2, 4)?))?;
    }
    Ok(pixd.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(w: u32, h: u32, val: u32) -> Pix {
        let mut pm = PixMut::new(w, h, PixelDepth::Bit8).unwrap();
        for y in 0..h {
            for x in 0..w {
                pm.set_pixel_unchecked(x, y, val);
            }
        }
        pm.into()
    }

    fn count_ones(pix: &Pix) -> u32 {
        let mut n = 0;
        for y in 0..pix.height() {
            for x in 0..pix.width() {
                n += pix.get_pixel_unchecked(x, y);
            }
        }
        n
    }

    #[test]
    fn test_binary_step_clips() {
        assert_eq!(binary_step(5, 10, 10), DitherStep::hard(1));
        assert_eq!(binary_step(250, 10, 10), DitherStep::hard(0));
        assert_eq!(
            binary_step(100, 10, 10),
            DitherStep {
                val: 1,
                e38: 37,
                e14: 25
            }
        );
        assert_eq!(
            binary_step(200, 10, 10),
            DitherStep {
                val: 0,
                e38: -20,
                e14: -13
            }
        );
    }

    #[test]
    fn test_dibit_step_levels() {
        assert_eq!(dibit_step(3, 5, 5), DitherStep::hard(0));
        assert_eq!(dibit_step(252, 5, 5), DitherStep::hard(3));
        assert_eq!(dibit_step(85, 5, 5), DitherStep::hard(1));
        assert_eq!(dibit_step(170, 5, 5), DitherStep::hard(2));
        // 100 - 85 = 15: (45 + 4) / 8 = 6, (15 + 2) / 4 = 4
        assert_eq!(
            dibit_step(100, 5, 5),
            DitherStep {
                val: 1,
                e38: 6,
                e14: 4
            }
        );
        // 60 - 85 = -25: (-75 - 4) / 8 = -9, (-25 - 2) / 4 = -6
        assert_eq!(
            dibit_step(60, 5, 5),
            DitherStep {
                val: 1,
                e38: -9,
                e14: -6
            }
        );
    }

    #[test]
    fn test_options_validation() {
        let pix = uniform(4, 4, 128);
        let bad = DitherOptions {
            lower_clip: -1,
            upper_clip: 10,
        };
        assert!(dither_to_binary_spec(&pix, &bad).is_err());
        let bad = DitherOptions {
            lower_clip: 10,
            upper_clip: 256,
        };
        assert!(DitherTables::binary(&bad).is_err());
        assert_eq!(DitherOptions::default(), DitherOptions::binary());
    }

    #[test]
    fn test_dither_binary_mid_gray() {
        let pix = uniform(16, 16, 128);
        let pixd = dither_to_binary(&pix).unwrap();
        assert_eq!(pixd.depth(), PixelDepth::Bit1);
        assert_eq!(count_ones(&pixd), 128);
    }

    #[test]
    fn test_dither_binary_extremes() {
        assert_eq!(count_ones(&dither_to_binary(&uniform(16, 16, 0)).unwrap()), 256);
        assert_eq!(count_ones(&dither_to_binary(&uniform(16, 16, 255)).unwrap()), 0);
        assert_eq!(count_ones(&dither_to_binary(&uniform(16, 16, 5)).unwrap()), 256);
        assert_eq!(count_ones(&dither_to_binary(&uniform(16, 16, 250)).unwrap()), 0);
    }

    #[test]
    fn test_dither_requires_8bpp() {
        let pix = Pix::new(8, 8, PixelDepth::Bit4).unwrap();
        assert!(matches!(
            dither_to_binary(&pix),
            Err(QuantError::UnsupportedDepth { actual: 4, .. })
        ));
        assert!(dither_to_2bpp(&pix, false).is_err());
    }

    #[test]
    fn test_dither_2bpp_exact_levels() {
        for (gray, level) in [(85, 1), (170, 2), (0, 0), (255, 3)] {
            let pixd = dither_to_2bpp(&uniform(9, 7, gray), false).unwrap();
            assert_eq!(pixd.depth(), PixelDepth::Bit2);
            for y in 0..7 {
                for x in 0..9 {
                    assert_eq!(pixd.get_pixel_unchecked(x, y), level);
                }
            }
        }
    }

    #[test]
    fn test_dither_2bpp_cmap() {
        let pixd = dither_to_2bpp(&uniform(4, 4, 128), true).unwrap();
        let cmap = pixd.colormap().unwrap();
        assert_eq!(cmap.len(), 4);
        assert_eq!(cmap.get_rgb(1), Some((85, 85, 85)));
    }

    #[test]
    fn test_lut_matches_table_accessors() {
        let tables = DitherTables::binary(&DitherOptions::binary()).unwrap();
        assert_eq!(tables.value(100), 1);
        assert_eq!(tables.share_38(100), 37);
        assert_eq!(tables.share_14(100), 25);
        assert_eq!(tables.value(200), 0);
        assert_eq!(tables.share_38(250), 0);
    }
}
