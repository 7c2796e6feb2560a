//! Error types for grayquant-threshold

use thiserror::Error;

/// Errors that can occur during quantization
#[derive(Debug, Error)]
pub enum QuantError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] grayquant_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Two images that must be congruent are not
    #[error("dimension mismatch: {w1}x{h1} vs {w2}x{h2}")]
    DimensionMismatch { w1: u32, h1: u32, w2: u32, h2: u32 },

    /// Not enough colormap entries for the requested number of bins
    #[error("{nbins} bins do not fit a {depth} bpp colormap")]
    ColormapCapacity { nbins: usize, depth: u32 },

    /// Scratch memory could not be obtained
    #[error("allocation failed")]
    AllocationFailed,
}

/// Result type for quantization operations
pub type QuantResult<T> = Result<T, QuantError>;
