//! Plane - single-channel floating-point image
//!
//! `Plane` holds the raw samples of one acquisition channel at one time
//! point. Detector data arrives as 8- or 16-bit integers or as floats; all
//! of them are widened to `f32` so that contrast windows can be expressed in
//! the detector's own units.
//!
//! # Examples
//!
//! ```
//! use compcolor_core::Plane;
//!
//! let mut plane = Plane::new(100, 100).unwrap();
//! plane.set_pixel(10, 20, 1500.0).unwrap();
//! assert_eq!(plane.get_pixel(10, 20).unwrap(), 1500.0);
//!
//! let (min_val, max_val) = plane.min_max();
//! assert_eq!((min_val, max_val), (0.0, 1500.0));
//! ```

use crate::error::{Error, Result};

/// Single-channel image of `f32` samples
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<f32>,
}

impl Plane {
    /// Create a new plane with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new plane with all pixels set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Plane {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a plane from raw `f32` data in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(Plane {
            width,
            height,
            data,
        })
    }

    /// Create a plane from 16-bit detector samples
    pub fn from_u16(width: u32, height: u32, data: &[u16]) -> Result<Self> {
        Self::from_data(width, height, data.iter().map(|&v| v as f32).collect())
    }

    /// Create a plane from 8-bit samples
    pub fn from_u8(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        Self::from_data(width, height, data.iter().map(|&v| v as f32).collect())
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        let idx = self.index_of(x, y)?;
        Ok(self.data[idx])
    }

    /// Set the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        let idx = self.index_of(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize> {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        Ok(idx)
    }

    /// Get the raw data slice
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get the raw data slice mutably
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Check if two planes have the same width and height
    pub fn sizes_equal(&self, other: &Plane) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Minimum and maximum sample, ignoring NaN
    ///
    /// Returns `(0.0, 0.0)` when every sample is NaN.
    pub fn min_max(&self) -> (f32, f32) {
        let mut min_val = f32::INFINITY;
        let mut max_val = f32::NEG_INFINITY;
        for &v in self.data.iter().filter(|v| !v.is_nan()) {
            min_val = min_val.min(v);
            max_val = max_val.max(v);
        }
        if min_val > max_val {
            return (0.0, 0.0);
        }
        (min_val, max_val)
    }

    /// Pixel-wise maximum with another plane, in place
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the sizes differ.
    pub fn max_assign(&mut self, other: &Plane) -> Result<()> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        for (d, &s) in self.data.iter_mut().zip(other.data.iter()) {
            if s > *d {
                *d = s;
            }
        }
        Ok(())
    }

    /// Maximum-intensity projection of several planes
    ///
    /// # Errors
    ///
    /// Returns `Error::NullInput` for an empty slice and
    /// `Error::DimensionMismatch` if the planes differ in size.
    pub fn max_projection(planes: &[Plane]) -> Result<Plane> {
        let (first, rest) = planes
            .split_first()
            .ok_or(Error::NullInput("no planes to project"))?;
        let mut out = first.clone();
        for plane in rest {
            out.max_assign(plane)?;
        }
        Ok(out)
    }
}
