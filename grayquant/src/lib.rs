//! grayquant - Grayscale quantization for Rust
//!
//! Reduces the bit depth of gray images, either pixel by pixel against
//! fixed or table-driven thresholds, or with error-diffusion dithering
//! that preserves average intensity.
//!
//! # Overview
//!
//! - 8 bpp to 1 bpp: fixed, per-pixel and dithered binarization
//! - 8 bpp to 2 bpp: uniform thresholding and dithering
//! - 8 bpp to 4 and 8 bpp: uniform thresholding, optionally colormapped
//! - Arbitrary bin boundaries with midpoint or bin-average colormaps
//! - 1 bpp masks by gray value, gray band and RGB distance
//!
//! # Example
//!
//! ```
//! use grayquant::{Pix, PixelDepth, threshold};
//!
//! let pix = Pix::new(64, 48, PixelDepth::Bit8).unwrap();
//! let binary = threshold::dither_to_binary(&pix).unwrap();
//! assert_eq!(binary.depth(), PixelDepth::Bit1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use grayquant_core::*;

// Re-export the engine as a module to keep its names grouped
pub use grayquant_threshold as threshold;
