//! Regression test parameters and operations

use crate::error::TestError;
use grayquant_core::Pix;

/// Regression test parameters
///
/// Tracks the test name, the running check index and every failure seen
/// so far.
pub struct RegParams {
    /// Name of the test (e.g., "dither")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn record(&mut self, failure: TestError) {
        eprintln!("Failure in {}_reg: {}", self.test_name, failure);
        self.failures.push(failure);
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta: diff,
            });
            false
        } else {
            true
        }
    }

    /// Compare two Pix images for exact equality
    ///
    /// Width, height, depth and every pixel value must match.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            let reason = format!(
                "dimension mismatch: {}x{}x{} vs {}x{}x{}",
                pix1.width(),
                pix1.height(),
                pix1.depth().bits(),
                pix2.width(),
                pix2.height(),
                pix2.depth().bits()
            );
            self.record(TestError::PixMismatch {
                index: self.index,
                reason,
            });
            return false;
        }

        for y in 0..pix1.height() {
            for x in 0..pix1.width() {
                if pix1.get_pixel_unchecked(x, y) != pix2.get_pixel_unchecked(x, y) {
                    self.record(TestError::PixMismatch {
                        index: self.index,
                        reason: format!("pixel mismatch at ({x}, {y})"),
                    });
                    return false;
                }
            }
        }

        true
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.failures.is_empty()
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }
}
