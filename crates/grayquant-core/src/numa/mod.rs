//! Numa - Numeric array
//!
//! A growable array of `f32` values. The quantizers use it to carry
//! sorted gray-level bin boundaries and only read it through
//! [`Numa::len`] and [`Numa::get_i32`].

use crate::error::{Error, Result};

/// Array of floating-point numbers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Numa {
    data: Vec<f32>,
}

impl Numa {
    /// Create a new empty Numa
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Numa from a slice of i32 values
    ///
    /// Each integer is converted to f32.
    pub fn from_i32_slice(data: &[i32]) -> Self {
        Self {
            data: data.iter().map(|&v| v as f32).collect(),
        }
    }

    /// Get the number of values
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }

    /// Get a value as i32, rounded half away from zero
    pub fn get_i32(&self, index: usize) -> Option<i32> {
        self.get(index).map(|v| {
            if v >= 0.0 {
                (v + 0.5) as i32
            } else {
                (v - 0.5) as i32
            }
        })
    }

    /// Add a value to the end
    pub fn push(&mut self, val: f32) {
        self.data.push(val);
    }

    /// Set a value at index
    pub fn set(&mut self, index: usize, val: f32) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = val;
        Ok(())
    }

    /// Get the underlying data as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Check whether values are strictly increasing
    pub fn is_strictly_increasing(&self) -> bool {
        self.data.windows(2).all(|w| w[0] < w[1])
    }

    /// Return a copy sorted in increasing order
    pub fn sorted_increasing(&self) -> Self {
        let mut data = self.data.clone();
        data.sort_by(|a, b| a.total_cmp(b));
        Self { data }
    }
}
