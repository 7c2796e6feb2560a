//! Quantization tables
//!
//! 256-entry lookup tables that map an 8-bit gray value either to a
//! colormap index or to a quantized gray value. Every table here is
//! built per call and is monotone non-decreasing in its input.

use crate::{QuantError, QuantResult};
use grayquant_core::{Numa, PixColormap};

/// A 256-entry table indexed by 8-bit gray value.
pub type QuantTable = [u32; 256];

/// Upper gray value of bin `j` when `[0, 255]` is split into `nlevels`
/// bins centered on equally spaced targets.
#[inline]
fn bin_threshold(j: u32, nlevels: u32) -> u32 {
    255 * (2 * j + 1) / (2 * nlevels - 2)
}

/// Smallest bin `j` whose threshold is at or above `val`.
fn bin_of(val: u32, nlevels: u32) -> u32 {
    (0..nlevels)
        .find(|&j| val <= bin_threshold(j, nlevels))
        .unwrap_or(nlevels - 1)
}

/// Build a table mapping gray value to colormap index.
///
/// `nlevels` must be in `[2, 256]`. The result satisfies `tab[0] == 0`
/// and `tab[255] == nlevels - 1`.
pub fn make_gray_quant_index_table(nlevels: u32) -> QuantResult<QuantTable> {
    if !(2..=256).contains(&nlevels) {
        return Err(QuantError::InvalidParameters(format!(
            "nlevels {nlevels} not in [2, 256]"
        )));
    }
    let mut tab = [0u32; 256];
    for (i, entry) in tab.iter_mut().enumerate() {
        *entry = bin_of(i as u32, nlevels);
    }
    Ok(tab)
}

/// Build a table mapping gray value to a quantized gray value at `depth`.
///
/// For `depth` 2 or 4 the level count is forced to `2^depth`, so the full
/// dynamic range of the destination is always used; `nlevels` only
/// matters at 8 bpp.
///
/// # Errors
///
/// Returns [`QuantError::InvalidParameters`] if `depth` is not 2, 4 or 8,
/// or if `nlevels` is outside `[2, 256]` at 8 bpp.
pub fn make_gray_quant_target_table(nlevels: u32, depth: u32) -> QuantResult<QuantTable> {
    let nlevels = match depth {
        2 | 4 => 1 << depth,
        8 if (2..=256).contains(&nlevels) => nlevels,
        8 => {
            return Err(QuantError::InvalidParameters(format!(
                "nlevels {nlevels} not in [2, 256]"
            )));
        }
        _ => {
            return Err(QuantError::InvalidParameters(format!(
                "target depth {depth} not in {{2, 4, 8}}"
            )));
        }
    };
    let maxval = (1u32 << depth) - 1;
    let mut tab = [0u32; 256];
    for (i, entry) in tab.iter_mut().enumerate() {
        *entry = maxval * bin_of(i as u32, nlevels) / (nlevels - 1);
    }
    Ok(tab)
}

/// Read and validate bin boundaries: integers in `[0, 255]`, strictly
/// increasing.
pub(crate) fn edge_values(edges: &Numa) -> QuantResult<Vec<u32>> {
    let mut out = Vec::with_capacity(edges.len());
    for i in 0..edges.len() {
        let val = edges.get_i32(i).unwrap_or(-1);
        if !(0..=255).contains(&val) {
            return Err(QuantError::InvalidParameters(format!(
                "bin boundary {i} = {val} not in [0, 255]"
            )));
        }
        let val = val as u32;
        if out.last().is_some_and(|&prev| val <= prev) {
            return Err(QuantError::InvalidParameters(
                "bin boundaries must be strictly increasing".to_string(),
            ));
        }
        out.push(val);
    }
    Ok(out)
}

/// Build an inverse colormap table for arbitrary bin boundaries.
///
/// `n` boundaries make `n + 1` bins: bin `i` covers `[edge[i-1], edge[i])`
/// with the last bin running through 255. The returned colormap holds the
/// truncated midpoint `(start + end) / 2` of each bin; the last bin uses
/// 255 as its end.
///
/// # Errors
///
/// Returns [`QuantError::ColormapCapacity`] if `n + 1 > 2^outdepth`.
pub fn make_gray_quant_table_arb(
    edges: &Numa,
    outdepth: u32,
) -> QuantResult<(QuantTable, PixColormap)> {
    if !matches!(outdepth, 1 | 2 | 4 | 8) {
        return Err(QuantError::InvalidParameters(format!(
            "outdepth {outdepth} not in {{1, 2, 4, 8}}"
        )));
    }
    let vals = edge_values(edges)?;
    let n = vals.len();
    if n + 1 > 1 << outdepth {
        return Err(QuantError::ColormapCapacity {
            nbins: n + 1,
            depth: outdepth,
        });
    }

    let mut tab = [0u32; 256];
    let mut cmap = PixColormap::new(outdepth)?;
    let mut jstart = 0u32;
    for (i, &val) in vals.iter().enumerate() {
        let ave = ((jstart + val) / 2) as u8;
        cmap.add_rgb(ave, ave, ave)?;
        for entry in &mut tab[jstart as usize..val as usize] {
            *entry = i as u32;
        }
        jstart = val;
    }
    let ave = ((jstart + 255) / 2) as u8;
    cmap.add_rgb(ave, ave, ave)?;
    for entry in &mut tab[jstart as usize..] {
        *entry = n as u32;
    }

    tracing::debug!(nbins = n + 1, outdepth, "built arbitrary quantization table");
    Ok((tab, cmap))
}
