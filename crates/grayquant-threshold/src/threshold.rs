//! Pointwise thresholding
//!
//! Converts gray images to lower depths one pixel at a time, with no
//! error propagation:
//! - Fixed and per-pixel (variable) binarization
//! - Uniform quantization to 2, 4 and 8 bpp, optionally colormapped
//! - Quantization with arbitrary bin boundaries

use crate::histo::make_gray_quant_colormap_arb;
use crate::tables::{
    QuantTable, make_gray_quant_index_table, make_gray_quant_table_arb,
    make_gray_quant_target_table,
};
use crate::{QuantError, QuantResult};
use grayquant_core::pix::{get_data_byte, get_line_pixel, set_data_bit_val, set_line_pixel};
use grayquant_core::{Numa, Pix, PixColormap, PixMut, PixelDepth};

/// Most bin boundaries accepted by [`threshold_gray_arb`].
pub const MAX_ARB_EDGES: usize = 255;

/// Options for thresholding with arbitrary bin boundaries
#[derive(Debug, Clone, Default)]
pub struct ArbThresholdOptions {
    /// Output depth (2, 4 or 8); `None` picks the smallest that fits
    pub outdepth: Option<u32>,
    /// Use the average gray of the pixels in each bin as its color,
    /// instead of the bin midpoint
    pub use_average: bool,
    /// Force the darkest colormap entry to black
    pub set_black: bool,
    /// Force the lightest colormap entry to white
    pub set_white: bool,
}

/// Map every pixel of an 8 bpp image through `tab` into a new image of
/// the given depth.
pub(crate) fn apply_table(pixs: &Pix, tab: &QuantTable, depth: PixelDepth) -> QuantResult<PixMut> {
    let w = pixs.width();
    let h = pixs.height();
    let mut pixd = PixMut::new(w, h, depth)?;
    pixd.copy_resolution_from(pixs);
    for y in 0..h {
        let lines = pixs.row_data(y);
        let lined = pixd.row_data_mut(y);
        for x in 0..w {
            let val = get_data_byte(lines, x) as usize;
            set_line_pixel(lined, x, depth, tab[val]);
        }
    }
    Ok(pixd)
}

fn require_8bpp(pixs: &Pix) -> QuantResult<()> {
    let d = pixs.depth();
    if d != PixelDepth::Bit8 {
        return Err(QuantError::UnsupportedDepth {
            expected: "8 bpp",
            actual: d.bits(),
        });
    }
    Ok(())
}

/// Binarize a 4 or 8 bpp image with a fixed threshold.
///
/// Output pixels are 1 where the source value is below `thresh`.
/// The threshold must lie in `[0, 16]` for 4 bpp and `[0, 256]` for
/// 8 bpp. A colormapped 4 bpp source is flattened to 8 bpp gray and the
/// threshold is scaled by 16 to match.
pub fn threshold_to_binary(pixs: &Pix, thresh: u32) -> QuantResult<Pix> {
    let d = pixs.depth();
    let limit = match d {
        PixelDepth::Bit4 => 16,
        PixelDepth::Bit8 => 256,
        _ => {
            return Err(QuantError::UnsupportedDepth {
                expected: "4 or 8 bpp",
                actual: d.bits(),
            });
        }
    };
    if thresh > limit {
        return Err(QuantError::InvalidParameters(format!(
            "threshold {thresh} not in [0, {limit}] for {} bpp",
            d.bits()
        )));
    }

    let pixt = pixs.remove_colormap_to_gray()?;
    let thresh = if pixs.has_colormap() && d == PixelDepth::Bit4 {
        thresh * 16
    } else {
        thresh
    };
    let td = pixt.depth();

    let w = pixs.width();
    let h = pixs.height();
    let mut pixd = PixMut::new(w, h, PixelDepth::Bit1)?;
    pixd.copy_resolution_from(pixs);
    for y in 0..h {
        let lines = pixt.row_data(y);
        let lined = pixd.row_data_mut(y);
        for x in 0..w {
            if get_line_pixel(lines, x, td) < thresh {
                set_data_bit_val(lined, x);
            }
        }
    }
    Ok(pixd.into())
}

/// Binarize with a per-pixel threshold image.
///
/// Both images must be 8 bpp and the same size. Output pixels are 1
/// where `pixs < pixg`.
pub fn var_threshold_to_binary(pixs: &Pix, pixg: &Pix) -> QuantResult<Pix> {
    require_8bpp(pixs)?;
    require_8bpp(pixg)?;
    if !pixs.same_size(pixg) {
        return Err(QuantError::DimensionMismatch {
            w1: pixs.width(),
            h1: pixs.height(),
            w2: pixg.width(),
            h2: pixg.height(),
        });
    }

    let w = pixs.width();
    let h = pixs.height();
    let mut pixd = PixMut::new(w, h, PixelDepth::Bit1)?;
    pixd.copy_resolution_from(pixs);
    for y in 0..h {
        let lines = pixs.row_data(y);
        let lineg = pixg.row_data(y);
        let lined = pixd.row_data_mut(y);
        for x in 0..w {
            if get_data_byte(lines, x) < get_data_byte(lineg, x) {
                set_data_bit_val(lined, x);
            }
        }
    }
    Ok(pixd.into())
}

/// Shared body of the 2 and 4 bpp uniform quantizers.
fn threshold_to_low_depth(
    pixs: &Pix,
    nlevels: u32,
    cmapflag: bool,
    depth: PixelDepth,
) -> QuantResult<Pix> {
    require_8bpp(pixs)?;
    let bits = depth.bits();
    let maxlevels = 1u32 << bits;
    if !(2..=maxlevels).contains(&nlevels) {
        return Err(QuantError::InvalidParameters(format!(
            "nlevels {nlevels} not in [2, {maxlevels}]"
        )));
    }

    let tab = if cmapflag {
        make_gray_quant_index_table(nlevels)?
    } else {
        make_gray_quant_target_table(maxlevels, bits)?
    };
    let pixt = pixs.remove_colormap_to_gray()?;
    let mut pixd = apply_table(&pixt, &tab, depth)?;
    if cmapflag {
        // Holds out (2^d - nlevels) entries for the caller
        pixd.set_colormap(Some(PixColormap::create_linear(bits, nlevels)?))?;
    }
    Ok(pixd.into())
}

/// Quantize an 8 bpp image to 2 bpp.
///
/// With `cmapflag` the output holds colormap indices into a linear gray
/// colormap of `nlevels` entries. Without it `nlevels` is ignored and
/// the output uses all 4 levels as gray values.
///
/// # Errors
///
/// Returns [`QuantError::InvalidParameters`] if `nlevels` is not in
/// `[2, 4]`.
pub fn threshold_to_2bpp(pixs: &Pix, nlevels: u32, cmapflag: bool) -> QuantResult<Pix> {
    threshold_to_low_depth(pixs, nlevels, cmapflag, PixelDepth::Bit2)
}

/// Quantize an 8 bpp image to 4 bpp; `nlevels` must be in `[2, 16]`.
///
/// See [`threshold_to_2bpp`] for the meaning of `cmapflag`.
pub fn threshold_to_4bpp(pixs: &Pix, nlevels: u32, cmapflag: bool) -> QuantResult<Pix> {
    threshold_to_low_depth(pixs, nlevels, cmapflag, PixelDepth::Bit4)
}

/// Quantize an 8 bpp image to `nlevels` equally spaced levels, staying
/// at 8 bpp.
///
/// Without `cmapflag` the output values are the quantized gray values
/// (0 and 255 at the ends). With it they are indices into a linear
/// colormap of `nlevels` entries.
pub fn threshold_on_8bpp(pixs: &Pix, nlevels: u32, cmapflag: bool) -> QuantResult<Pix> {
    require_8bpp(pixs)?;
    if !(2..=256).contains(&nlevels) {
        return Err(QuantError::InvalidParameters(format!(
            "nlevels {nlevels} not in [2, 256]"
        )));
    }

    let tab = if cmapflag {
        make_gray_quant_index_table(nlevels)?
    } else {
        make_gray_quant_target_table(nlevels, 8)?
    };
    let pixt = pixs.remove_colormap_to_gray()?;
    let mut pixd = apply_table(&pixt, &tab, PixelDepth::Bit8)?;
    if cmapflag {
        pixd.set_colormap(Some(PixColormap::create_linear(8, nlevels)?))?;
    }
    Ok(pixd.into())
}

/// Parse bin boundaries from text separated by whitespace and/or commas.
///
/// ```
/// use grayquant_threshold::parse_edge_values;
///
/// let edges = parse_edge_values("45, 90 135").unwrap();
/// assert_eq!(edges.len(), 3);
/// assert_eq!(edges.get_i32(1), Some(90));
/// ```
pub fn parse_edge_values(text: &str) -> QuantResult<Numa> {
    let mut edges = Numa::new();
    for token in text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let val: i32 = token.parse().map_err(|_| {
            QuantError::InvalidParameters(format!("invalid edge value '{token}'"))
        })?;
        edges.push(val as f32);
    }
    Ok(edges)
}

/// Smallest colormapped depth holding `nbins` entries.
fn min_depth_for_bins(nbins: usize) -> u32 {
    match nbins {
        0..=4 => 2,
        5..=16 => 4,
        _ => 8,
    }
}

/// Quantize an 8 bpp image using arbitrary bin boundaries.
///
/// `edges` holds `n` boundaries (sorted here) defining `n + 1` bins; the
/// output is colormapped with one entry per bin. A requested depth too
/// small for the bin count is raised to the next of 2, 4, 8.
///
/// # Errors
///
/// Returns [`QuantError::InvalidParameters`] if there are no or more
/// than 255 edges, if any edge is outside `[0, 255]` or repeated, or if
/// the requested depth is not 2, 4 or 8.
pub fn threshold_gray_arb(
    pixs: &Pix,
    edges: &Numa,
    options: &ArbThresholdOptions,
) -> QuantResult<Pix> {
    require_8bpp(pixs)?;
    let n = edges.len();
    if n == 0 || n > MAX_ARB_EDGES {
        return Err(QuantError::InvalidParameters(format!(
            "{n} edges; need between 1 and {MAX_ARB_EDGES}"
        )));
    }

    let nbins = n + 1;
    let needed = min_depth_for_bins(nbins);
    let outdepth = match options.outdepth {
        None => needed,
        Some(d @ (2 | 4 | 8)) if d >= needed => d,
        Some(d @ (2 | 4 | 8)) => {
            tracing::warn!(
                requested = d,
                depth = needed,
                nbins,
                "output depth too small for bin count; promoting"
            );
            needed
        }
        Some(d) => {
            return Err(QuantError::InvalidParameters(format!(
                "outdepth {d} not in {{2, 4, 8}}"
            )));
        }
    };

    let sorted = edges.sorted_increasing();
    let (tab, mut cmap) = make_gray_quant_table_arb(&sorted, outdepth)?;
    let pixt = pixs.remove_colormap_to_gray()?;
    if options.use_average {
        cmap = make_gray_quant_colormap_arb(&pixt, &tab, outdepth)?;
    }
    cmap.set_black_and_white(options.set_black, options.set_white)?;

    let depth = PixelDepth::from_bits(outdepth)?;
    let mut pixd = apply_table(&pixt, &tab, depth)?;
    pixd.set_colormap(Some(cmap))?;
    Ok(pixd.into())
}
