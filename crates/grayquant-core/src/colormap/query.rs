//! PixColormap query functions
//!
//! Gray lookups, color detection and depth queries used by the
//! quantizers.

use super::PixColormap;
use crate::error::{Error, Result};

impl PixColormap {
    /// Check whether any entry has distinct R, G, B components.
    pub fn has_color(&self) -> bool {
        self.colors
            .iter()
            .any(|c| c.red != c.green || c.red != c.blue)
    }

    /// Check if the colormap contains only grayscale colors
    pub fn is_grayscale(&self) -> bool {
        !self.has_color()
    }

    /// Minimum pixel depth (2, 4 or 8) able to index every entry.
    ///
    /// 1 bpp is never returned.
    pub fn min_depth(&self) -> u32 {
        match self.len() {
            0..=4 => 2,
            5..=16 => 4,
            _ => 8,
        }
    }

    /// Find the entry whose gray level is closest to `val`.
    ///
    /// The colormap is expected to be gray; the green component is
    /// compared. Ties resolve to the lowest index. Returns `None` for an
    /// empty colormap.
    pub fn find_nearest_gray(&self, val: u8) -> Option<usize> {
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|(_, c)| (i32::from(c.green) - i32::from(val)).abs())
            .map(|(i, _)| i)
    }

    /// Force the darkest entry to black and/or the lightest to white.
    ///
    /// Intensity is the component sum; ties pick the lowest index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the colormap is empty.
    pub fn set_black_and_white(&mut self, set_black: bool, set_white: bool) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidParameter("empty colormap".to_string()));
        }
        let sums: Vec<u32> = self
            .colors
            .iter()
            .map(|c| c.red as u32 + c.green as u32 + c.blue as u32)
            .collect();
        let mut darkest = 0;
        let mut lightest = 0;
        for (i, &sum) in sums.iter().enumerate().skip(1) {
            if sum < sums[darkest] {
                darkest = i;
            }
            if sum > sums[lightest] {
                lightest = i;
            }
        }
        if set_black {
            self.reset_color(darkest, 0, 0, 0)?;
        }
        if set_white {
            self.reset_color(lightest, 255, 255, 255)?;
        }
        Ok(())
    }
}
