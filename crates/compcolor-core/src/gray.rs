//! GrayPix - 8-bit single-channel image
//!
//! The display-range image produced by intensity windowing. One byte per
//! pixel, row-major, no padding.

use crate::error::{Error, Result};

/// 8-bit grayscale image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayPix {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayPix {
    /// Create a new image with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(GrayPix {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize)],
        })
    }

    /// Create an image from raw bytes in row-major order
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(GrayPix {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the pixel value at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data() {
        let pix = GrayPix::from_data(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(pix.get_pixel(1, 1), Some(4));
        assert_eq!(pix.get_pixel(2, 0), None);
        assert!(GrayPix::from_data(2, 2, vec![0; 5]).is_err());
    }
}
