//! Binary mask generation
//!
//! 1 bpp masks marking pixels that match a gray value, fall inside or
//! outside a gray band, or sit near a reference RGB color.

use crate::{QuantError, QuantResult};
use grayquant_core::pix::{get_line_pixel, set_data_bit_val};
use grayquant_core::{Pix, PixMut, PixelDepth, color};

/// Distance metric for [`generate_mask_by_discr_32`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceKind {
    /// Sum of absolute component differences (L1)
    #[default]
    Manhattan,
    /// Sum of squared component differences (L2 squared)
    Euclidean,
}

impl DistanceKind {
    fn distance(self, a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
        let diffs = [
            i32::from(a.0) - i32::from(b.0),
            i32::from(a.1) - i32::from(b.1),
            i32::from(a.2) - i32::from(b.2),
        ];
        match self {
            DistanceKind::Manhattan => diffs.iter().map(|d| d.unsigned_abs()).sum(),
            DistanceKind::Euclidean => diffs.iter().map(|d| (d * d) as u32).sum(),
        }
    }
}

/// Validate a 4/8 bpp source and flatten its colormap unless the
/// colormap indices are wanted.
fn gray_source(pixs: &Pix, usecmap: bool) -> QuantResult<Pix> {
    let d = pixs.depth();
    if d != PixelDepth::Bit4 && d != PixelDepth::Bit8 {
        return Err(QuantError::UnsupportedDepth {
            expected: "4 or 8 bpp",
            actual: d.bits(),
        });
    }
    if !usecmap && pixs.has_colormap() {
        Ok(pixs.remove_colormap_to_gray()?)
    } else {
        Ok(pixs.clone())
    }
}

/// Build a 1 bpp mask the size of `pixs` from a per-pixel predicate.
fn mask_from(pixs: &Pix, pred: impl Fn(u32) -> bool) -> QuantResult<Pix> {
    let w = pixs.width();
    let h = pixs.height();
    let d = pixs.depth();
    let mut pixd = PixMut::new(w, h, PixelDepth::Bit1)?;
    pixd.copy_resolution_from(pixs);
    for y in 0..h {
        let lines = pixs.row_data(y);
        let lined = pixd.row_data_mut(y);
        for x in 0..w {
            if pred(get_line_pixel(lines, x, d)) {
                set_data_bit_val(lined, x);
            }
        }
    }
    Ok(pixd.into())
}

/// Mask of the pixels equal to `val`.
///
/// `pixs` is 4 or 8 bpp. For a colormapped source, `usecmap` selects
/// between matching colormap indices (`true`) and matching the gray
/// values of the flattened image (`false`). `val` is checked against the
/// depth actually compared.
pub fn generate_mask_by_value(pixs: &Pix, val: u32, usecmap: bool) -> QuantResult<Pix> {
    let pixg = gray_source(pixs, usecmap)?;
    let maxval = pixg.depth().max_value();
    if val > maxval {
        return Err(QuantError::InvalidParameters(format!(
            "val {val} not in [0, {maxval}]"
        )));
    }
    mask_from(&pixg, |v| v == val)
}

/// Mask of the pixels inside (`inband`) or outside `[lower, upper]`.
///
/// # Errors
///
/// Returns [`QuantError::InvalidParameters`] if `lower > upper` or if
/// `upper` exceeds the compared depth's maximum.
pub fn generate_mask_by_band(
    pixs: &Pix,
    lower: u32,
    upper: u32,
    inband: bool,
    usecmap: bool,
) -> QuantResult<Pix> {
    if lower > upper {
        return Err(QuantError::InvalidParameters(format!(
            "lower {lower} > upper {upper}"
        )));
    }
    let pixg = gray_source(pixs, usecmap)?;
    let maxval = pixg.depth().max_value();
    if upper > maxval {
        return Err(QuantError::InvalidParameters(format!(
            "upper {upper} > {maxval} at {} bpp",
            pixg.depth().bits()
        )));
    }
    mask_from(&pixg, |v| (lower..=upper).contains(&v) == inband)
}

fn require_rgb(pixs: &Pix) -> QuantResult<()> {
    let d = pixs.depth();
    if d != PixelDepth::Bit32 {
        return Err(QuantError::UnsupportedDepth {
            expected: "32 bpp",
            actual: d.bits(),
        });
    }
    Ok(())
}

/// Mask of the RGB pixels whose every component lies within
/// `[ref - delm, ref + delp]` of the matching component of `refval`.
pub fn generate_mask_by_band_32(pixs: &Pix, refval: u32, delm: i32, delp: i32) -> QuantResult<Pix> {
    require_rgb(pixs)?;
    if delm < 0 || delp < 0 {
        return Err(QuantError::InvalidParameters(
            "delm and delp must be >= 0".to_string(),
        ));
    }
    let (rref, gref, bref) = color::extract_rgb(refval);
    let (delm, delp) = (i64::from(delm), i64::from(delp));
    let within = move |val: u8, refc: u8| {
        let (val, refc) = (i64::from(val), i64::from(refc));
        val >= refc - delm && val <= refc + delp
    };
    mask_from(pixs, |pixel| {
        let (r, g, b) = color::extract_rgb(pixel);
        within(r, rref) && within(g, gref) && within(b, bref)
    })
}

/// Mask of the RGB pixels closer to `refval1` than to `refval2`.
///
/// Ties go to `refval2` (mask bit 0).
pub fn generate_mask_by_discr_32(
    pixs: &Pix,
    refval1: u32,
    refval2: u32,
    kind: DistanceKind,
) -> QuantResult<Pix> {
    require_rgb(pixs)?;
    let ref1 = color::extract_rgb(refval1);
    let ref2 = color::extract_rgb(refval2);
    mask_from(pixs, |pixel| {
        let rgb = color::extract_rgb(pixel);
        kind.distance(rgb, ref1) < kind.distance(rgb, ref2)
    })
}
