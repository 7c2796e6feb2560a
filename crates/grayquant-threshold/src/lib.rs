//! grayquant threshold - Gray quantization for bit-depth reduction
//!
//! This crate converts 8 bpp gray images to lower depths:
//!
//! - **Tables** ([`tables`]): gray-to-index and gray-to-target lookup
//!   tables, uniform or with arbitrary bin boundaries
//! - **Dithering** ([`dither`]): error diffusion to 1 and 2 bpp with
//!   clipping near black and white
//! - **Thresholding** ([`threshold`]): fixed, variable and multi-level
//!   pointwise quantization
//! - **Masks** ([`mask`]): 1 bpp masks by gray value, gray band, RGB band
//!   and RGB discriminant
//! - **Histogram colormaps** ([`histo`]): bin-average colormaps and
//!   quantization onto an existing colormap
//!
//! All operations return a new image; the source is never modified.

pub mod dither;
pub mod error;
pub mod histo;
pub mod mask;
pub mod tables;
pub mod threshold;

// Re-export core types
pub use grayquant_core;

// Re-export error types
pub use error::{QuantError, QuantResult};

pub use dither::{
    DitherOptions, DitherTables, dither_to_2bpp, dither_to_2bpp_lut, dither_to_2bpp_spec,
    dither_to_binary, dither_to_binary_lut, dither_to_binary_spec,
};
pub use histo::{gray_quant_from_cmap, make_gray_quant_colormap_arb};
pub use mask::{
    DistanceKind, generate_mask_by_band, generate_mask_by_band_32, generate_mask_by_discr_32,
    generate_mask_by_value,
};
pub use tables::{
    QuantTable, make_gray_quant_index_table, make_gray_quant_table_arb,
    make_gray_quant_target_table,
};
pub use threshold::{
    ArbThresholdOptions, parse_edge_values, threshold_gray_arb, threshold_on_8bpp,
    threshold_to_2bpp, threshold_to_4bpp, threshold_to_binary, var_threshold_to_binary,
};
