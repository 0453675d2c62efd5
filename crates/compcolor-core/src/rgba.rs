//! RgbaPix - 32-bit RGBA image container
//!
//! Composites and colorized channels are stored as one packed `u32` per
//! pixel in `0xRRGGBBAA` order (see [`crate::color`]).
//!
//! # Ownership model
//!
//! `RgbaPix` uses `Arc` for cheap cloning, so a rendered frame can be handed
//! to a renderer and an exporter without copying pixel data. To modify
//! pixels, convert to [`RgbaPixMut`] via [`RgbaPix::try_into_mut`] or
//! [`RgbaPix::to_mut`], then convert back with `Into<RgbaPix>`.

use crate::color;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal image data
#[derive(Debug)]
struct RgbaData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Packed 0xRRGGBBAA pixels, row-major, no padding
    data: Vec<u32>,
}

impl RgbaData {
    fn new(width: u32, height: u32, fill: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(RgbaData {
            width,
            height,
            data: vec![fill; (width as usize) * (height as usize)],
        })
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }
}

/// Immutable RGBA image with shared pixel storage
///
/// # Examples
///
/// ```
/// use compcolor_core::RgbaPix;
///
/// let pix = RgbaPix::new(64, 48).unwrap();
/// assert_eq!(pix.width(), 64);
/// assert_eq!(pix.get_rgba(0, 0), Some((0, 0, 0, 255)));
/// ```
#[derive(Debug, Clone)]
pub struct RgbaPix {
    inner: Arc<RgbaData>,
}

impl RgbaPix {
    /// Create a new opaque black image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, color::compose_rgb(0, 0, 0))
    }

    /// Create a new image with every pixel set to `pixel`.
    pub fn new_filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        Ok(RgbaPix {
            inner: Arc::new(RgbaData::new(width, height, pixel)?),
        })
    }

    /// Wrap packed pixel data in row-major order.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
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
        Ok(RgbaPix {
            inner: Arc::new(RgbaData {
                width,
                height,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get raw access to the packed pixels.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to the pixel data.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the packed pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.inner.offset(x, y).map(|i| self.inner.data[i])
    }

    /// Get the RGB components at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get the RGBA components at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgba)
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &RgbaPix) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Interleaved `[r, g, b, a, r, g, b, a, ...]` bytes, the layout image
    /// encoders and GUI textures expect.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.data.len() * 4);
        for &pixel in &self.inner.data {
            let (r, g, b, a) = color::extract_rgba(pixel);
            out.extend_from_slice(&[r, g, b, a]);
        }
        out
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RgbaPixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RgbaPixMut { inner: data }),
            Err(arc) => Err(RgbaPix { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> RgbaPixMut {
        RgbaPixMut {
            inner: RgbaData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

impl PartialEq for RgbaPix {
    fn eq(&self, other: &Self) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }
}

impl Eq for RgbaPix {}

/// Mutable RGBA image
///
/// Convert back to an immutable [`RgbaPix`] using `Into<RgbaPix>`.
#[derive(Debug)]
pub struct RgbaPixMut {
    inner: RgbaData,
}

impl RgbaPixMut {
    /// Create a new opaque black image.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(RgbaPixMut {
            inner: RgbaData::new(width, height, color::compose_rgb(0, 0, 0))?,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.inner.offset(x, y).map(|i| self.inner.data[i])
    }

    /// Set the packed pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinates are outside the
    /// image.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: u32) -> Result<()> {
        let idx = self.inner.offset(x, y).ok_or(Error::IndexOutOfBounds {
            index: (y as usize) * (self.inner.width as usize) + (x as usize),
            len: self.inner.data.len(),
        })?;
        self.inner.data[idx] = pixel;
        Ok(())
    }

    /// Set an opaque RGB color at (x, y).
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Set an RGBA color at (x, y).
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }
}

impl From<RgbaPixMut> for RgbaPix {
    fn from(pix: RgbaPixMut) -> Self {
        RgbaPix {
            inner: Arc::new(pix.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_opaque_black() {
        let pix = RgbaPix::new(3, 2).unwrap();
        assert_eq!(pix.dimensions(), (3, 2));
        assert_eq!(pix.get_rgba(2, 1), Some((0, 0, 0, 255)));
        assert_eq!(pix.get_rgba(3, 0), None);
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(RgbaPix::new(0, 1).is_err());
        assert!(RgbaPixMut::new(1, 0).is_err());
    }

    #[test]
    fn test_mut_roundtrip() {
        let pix = RgbaPix::new(4, 4).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_rgb(1, 2, 10, 20, 30).unwrap();
        assert!(pm.set_rgb(4, 0, 1, 1, 1).is_err());
        let pix: RgbaPix = pm.into();
        assert_eq!(pix.get_rgb(1, 2), Some((10, 20, 30)));
    }

    #[test]
    fn test_try_into_mut_shared_fails() {
        let pix = RgbaPix::new(2, 2).unwrap();
        let shared = pix.clone();
        assert_eq!(pix.ref_count(), 2);
        let pix = pix.try_into_mut().unwrap_err();
        drop(shared);
        assert!(pix.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_rgba_bytes() {
        let mut pm = RgbaPixMut::new(2, 1).unwrap();
        pm.set_rgba(0, 0, 1, 2, 3, 4).unwrap();
        let pix: RgbaPix = pm.into();
        assert_eq!(pix.to_rgba_bytes(), vec![1, 2, 3, 4, 0, 0, 0, 255]);
    }

    #[test]
    fn test_equality_compares_pixels() {
        let a = RgbaPix::new(2, 2).unwrap();
        let b = RgbaPix::new(2, 2).unwrap();
        assert_eq!(a, b);
        let mut bm = b.to_mut();
        bm.set_rgb(0, 0, 1, 0, 0).unwrap();
        assert_ne!(a, RgbaPix::from(bm));
    }
}
