//! Colormaps from image content
//!
//! Average-value colormaps for arbitrary bins, and quantization of a gray
//! image onto an existing colormap.

use crate::tables::QuantTable;
use crate::threshold::apply_table;
use crate::{QuantError, QuantResult};
use grayquant_core::pix::{BLUE_WEIGHT, GREEN_WEIGHT, RED_WEIGHT, get_data_byte};
use grayquant_core::{Pix, PixColormap, PixelDepth};

/// Approximate number of pixels sampled when averaging bins.
const TARGET_SAMPLES: f64 = 30000.0;

/// Build a colormap holding the average gray value of each bin.
///
/// `tab` is an inverse colormap (gray value to bin index), typically from
/// [`make_gray_quant_table_arb`](crate::make_gray_quant_table_arb), with
/// `tab[255] + 1` bins. The image is sampled on a square grid whose
/// stride targets about 30000 samples. A bin with no samples gets the
/// midpoint between its start and the next bin's start (255 for the last
/// bin).
///
/// # Errors
///
/// Returns [`QuantError::ColormapCapacity`] if the bins do not fit a
/// colormap of `outdepth`.
pub fn make_gray_quant_colormap_arb(
    pixs: &Pix,
    tab: &QuantTable,
    outdepth: u32,
) -> QuantResult<PixColormap> {
    let d = pixs.depth();
    if d != PixelDepth::Bit8 {
        return Err(QuantError::UnsupportedDepth {
            expected: "8 bpp",
            actual: d.bits(),
        });
    }
    if !matches!(outdepth, 1 | 2 | 4 | 8) {
        return Err(QuantError::InvalidParameters(format!(
            "outdepth {outdepth} not in {{1, 2, 4, 8}}"
        )));
    }
    let nbins = tab[255] as usize + 1;
    if nbins > 1 << outdepth {
        return Err(QuantError::ColormapCapacity {
            nbins,
            depth: outdepth,
        });
    }
    if tab.iter().any(|&b| b as usize >= nbins) {
        return Err(QuantError::InvalidParameters(
            "table entry exceeds tab[255]".to_string(),
        ));
    }

    let w = pixs.width();
    let h = pixs.height();
    let npix = f64::from(w) * f64::from(h);
    let factor = (((npix / TARGET_SAMPLES).sqrt() + 0.5) as u32).max(1);
    tracing::debug!(nbins, factor, "sampling bins for average colormap");

    let mut count = vec![0u64; nbins];
    let mut total = vec![0u64; nbins];
    for y in (0..h).step_by(factor as usize) {
        let line = pixs.row_data(y);
        for x in (0..w).step_by(factor as usize) {
            let val = get_data_byte(line, x);
            let bin = tab[val as usize] as usize;
            count[bin] += 1;
            total[bin] += u64::from(val);
        }
    }

    // Smallest gray value of each bin
    let mut binstart = vec![0u32; nbins];
    let mut index = 1;
    for (i, &bin) in tab.iter().enumerate().skip(1) {
        if index >= nbins {
            break;
        }
        if bin as usize == index {
            binstart[index] = i as u32;
            index += 1;
        }
    }

    let mut cmap = PixColormap::new(outdepth)?;
    for i in 0..nbins {
        let val = if count[i] > 0 {
            (total[i] / count[i]) as u32
        } else if i + 1 < nbins {
            (binstart[i] + binstart[i + 1]) / 2
        } else {
            (binstart[i] + 255) / 2
        };
        let val = val as u8;
        cmap.add_rgb(val, val, val)?;
    }
    Ok(cmap)
}

/// Quantize an 8 bpp gray image to the nearest gray of `cmap`.
///
/// A colormap with color is first converted to gray (weights 0.3, 0.5,
/// 0.2). The output depth is the larger of `mindepth` (2, 4 or 8) and the
/// smallest depth that can index the colormap. A source that already has
/// a colormap is returned unchanged as a copy.
pub fn gray_quant_from_cmap(pixs: &Pix, cmap: &PixColormap, mindepth: u32) -> QuantResult<Pix> {
    if pixs.has_colormap() {
        tracing::warn!("source already has a colormap; returning a copy");
        return Ok(pixs.deep_clone());
    }
    let d = pixs.depth();
    if d != PixelDepth::Bit8 {
        return Err(QuantError::UnsupportedDepth {
            expected: "8 bpp",
            actual: d.bits(),
        });
    }
    if !matches!(mindepth, 2 | 4 | 8) {
        return Err(QuantError::InvalidParameters(format!(
            "mindepth {mindepth} not in {{2, 4, 8}}"
        )));
    }
    if cmap.is_empty() {
        return Err(QuantError::InvalidParameters("empty colormap".to_string()));
    }

    let cmapd = if cmap.has_color() {
        tracing::warn!("converting colormap colors to gray");
        cmap.color_to_gray(RED_WEIGHT, GREEN_WEIGHT, BLUE_WEIGHT)?
    } else {
        cmap.clone()
    };

    let mut tab = [0u32; 256];
    for (i, entry) in tab.iter_mut().enumerate() {
        *entry = cmapd.find_nearest_gray(i as u8).unwrap_or(0) as u32;
    }

    let depth = PixelDepth::from_bits(cmap.min_depth().max(mindepth))?;
    let mut pixd = apply_table(pixs, &tab, depth)?;
    pixd.set_colormap(Some(cmapd))?;
    Ok(pixd.into())
}
