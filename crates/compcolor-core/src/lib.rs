//! Compcolor Core - Image containers for multi-channel compositing
//!
//! This crate provides the data structures shared by the rest of the
//! workspace:
//!
//! - [`Plane`] - One raw channel image (`f32` samples)
//! - [`GrayPix`] - 8-bit display-range image
//! - [`RgbaPix`] / [`RgbaPixMut`] - Packed RGBA image (immutable / mutable)
//! - [`ImageStack`] - `(time, channel, height, width)` acquisition stack
//! - [`Histogram`] - Equal-width intensity histogram with statistics

pub mod error;
pub mod gray;
pub mod histogram;
pub mod plane;
pub mod rgba;
pub mod stack;

pub use error::{Error, Result};
pub use gray::GrayPix;
pub use histogram::{Histogram, HistogramStats};
pub use plane::Plane;
pub use rgba::{RgbaPix, RgbaPixMut};
pub use stack::ImageStack;

/// Color channel indices and helper functions for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Red channel (MSB, byte 0)
    pub const RED: usize = 0;
    /// Green channel (byte 1)
    pub const GREEN: usize = 1;
    /// Blue channel (byte 2)
    pub const BLUE: usize = 2;
    /// Alpha channel (LSB, byte 3)
    pub const ALPHA: usize = 3;

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

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Per-component maximum of two pixels.
    ///
    /// Each of R, G, B and A is compared independently, so the result need
    /// not equal either input.
    #[inline]
    pub fn max_components(a: u32, b: u32) -> u32 {
        let mut out = 0u32;
        for shift in [RED_SHIFT, GREEN_SHIFT, BLUE_SHIFT, ALPHA_SHIFT] {
            let ca = (a >> shift) & 0xff;
            let cb = (b >> shift) & 0xff;
            out |= ca.max(cb) << shift;
        }
        out
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_extract() {
            let p = compose_rgba(1, 2, 3, 4);
            assert_eq!(p, 0x01020304);
            assert_eq!(extract_rgba(p), (1, 2, 3, 4));
            assert_eq!(alpha(compose_rgb(9, 9, 9)), 255);
        }

        #[test]
        fn test_max_components_is_per_plane() {
            let a = compose_rgba(200, 10, 0, 255);
            let b = compose_rgba(50, 90, 30, 128);
            assert_eq!(extract_rgba(max_components(a, b)), (200, 90, 30, 255));
            assert_eq!(max_components(a, b), max_components(b, a));
        }
    }
}
