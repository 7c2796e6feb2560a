//! grayquant core - raster collaborators for grayscale quantization
//!
//! This crate provides the data structures the quantization engine
//! reads from and writes to:
//!
//! - [`Pix`] / [`PixMut`] - Packed raster image (immutable / mutable)
//! - [`PixColormap`] - Color palette for indexed images
//! - [`Numa`] - Numeric array, used for histogram bin boundaries
//!
//! Pixel data is stored row-major in 32-bit words, pixels packed MSB
//! first, so every row is independently addressable at 1, 2, 4, 8 and
//! 32 bits per pixel.

pub mod colormap;
pub mod error;
pub mod numa;
pub mod pix;

pub use colormap::{PixColormap, RgbaQuad};
pub use error::{Error, Result};
pub use numa::Numa;
pub use pix::{Pix, PixMut, PixelDepth};

/// Color channel helpers for 32-bit RGB pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

}
