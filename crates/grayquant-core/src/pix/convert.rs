//! Colormap removal
//!
//! Flattens a colormapped image to 8 bpp grayscale so that the
//! quantization routines only ever see gray values.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

/// Default red weight for color-to-gray conversion.
pub const RED_WEIGHT: f32 = 0.3;
/// Default green weight for color-to-gray conversion.
pub const GREEN_WEIGHT: f32 = 0.5;
/// Default blue weight for color-to-gray conversion.
pub const BLUE_WEIGHT: f32 = 0.2;

impl Pix {
    /// Remove the colormap, producing 8 bpp grayscale.
    ///
    /// Uses the default weights (0.3, 0.5, 0.2). If there is no colormap
    /// the image is returned as a shared clone.
    pub fn remove_colormap_to_gray(&self) -> Result<Pix> {
        self.remove_colormap_to_gray_weighted(RED_WEIGHT, GREEN_WEIGHT, BLUE_WEIGHT)
    }

    /// Remove the colormap using caller-supplied RGB weights.
    ///
    /// The output is always 8 bpp, whatever the source depth, and carries
    /// the source resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any weight is negative.
    pub fn remove_colormap_to_gray_weighted(&self, rwt: f32, gwt: f32, bwt: f32) -> Result<Pix> {
        let Some(cmap) = self.colormap() else {
            return Ok(self.clone());
        };
        if rwt < 0.0 || gwt < 0.0 || bwt < 0.0 {
            return Err(Error::InvalidParameter(
                "color-to-gray weights must be non-negative".to_string(),
            ));
        }

        let w = self.width();
        let h = self.height();
        let d = self.depth();
        if d == PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(d.bits()));
        }

        // Out-of-range indices map to black
        let mut graymap = vec![0u32; 1 << d.bits()];
        for (i, gray) in graymap.iter_mut().enumerate().take(cmap.len()) {
            if let Some((r, g, b)) = cmap.get_rgb(i) {
                let val = rwt * r as f32 + gwt * g as f32 + bwt * b as f32 + 0.5;
                *gray = (val as u32).min(255);
            }
        }

        let mut result = PixMut::new(w, h, PixelDepth::Bit8)?;
        result.copy_resolution_from(self);
        for y in 0..h {
            for x in 0..w {
                let index = self.get_pixel_unchecked(x, y) as usize;
                result.set_pixel_unchecked(x, y, graymap[index]);
            }
        }
        Ok(result.into())
    }
}
