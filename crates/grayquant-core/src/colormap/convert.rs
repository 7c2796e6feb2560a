//! PixColormap conversion

use super::{PixColormap, RgbaQuad};
use crate::error::{Error, Result};

impl PixColormap {
    /// Derive a gray colormap from a colored one.
    ///
    /// Each entry becomes `rwt*r + gwt*g + bwt*b`, rounded. Weights that
    /// do not sum to 1 are normalized first; alpha is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a weight is negative or all
    /// weights are zero.
    pub fn color_to_gray(&self, mut rwt: f32, mut gwt: f32, mut bwt: f32) -> Result<Self> {
        if rwt < 0.0 || gwt < 0.0 || bwt < 0.0 {
            return Err(Error::InvalidParameter(
                "weights must be non-negative".to_string(),
            ));
        }
        let sum = rwt + gwt + bwt;
        if sum == 0.0 {
            return Err(Error::InvalidParameter("weights sum to zero".to_string()));
        }
        if (sum - 1.0).abs() > 0.0001 {
            rwt /= sum;
            gwt /= sum;
            bwt /= sum;
        }

        let colors = self
            .colors
            .iter()
            .map(|c| {
                let val =
                    (rwt * c.red as f32 + gwt * c.green as f32 + bwt * c.blue as f32 + 0.5) as u32;
                let val = val.min(255) as u8;
                RgbaQuad::new(val, val, val, c.alpha)
            })
            .collect();
        Ok(Self {
            colors,
            depth: self.depth,
        })
    }
}
