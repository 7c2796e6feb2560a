//! grayquant-test - Regression test harness for grayquant
//!
//! Tests record numbered checks on a [`RegParams`] and report all
//! failures at the end, so one run shows every mismatch:
//!
//! ```ignore
//! use grayquant_test::RegParams;
//!
//! let mut rp = RegParams::new("dither");
//! rp.compare_values(128.0, ones as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Input images are generated in memory by the builders in [`images`].

mod error;
pub mod images;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;
