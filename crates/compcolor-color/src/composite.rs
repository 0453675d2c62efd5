//! Max-projection compositing
//!
//! Turns three raw channel planes into one false-color RGBA image:
//!
//! 1. each plane is windowed to 8 bits with its own contrast window
//!    ([`crate::rescale`]);
//! 2. each windowed plane is colorized through its ramp ([`colorize`]),
//!    fully opaque;
//! 3. the colorized images are combined by taking, per pixel and per
//!    component, the maximum ([`max_project`]).
//!
//! The maximum lets the brightest signal dominate instead of averaging
//! overlapping fluorophores into a muddy mix. Because it is commutative and
//! associative the channel order never affects the result.

use crate::ramp::ColorRamp;
use crate::rescale::{ContrastWindow, check_shapes, rescale_with_window};
use crate::{ColorError, ColorResult};
use compcolor_core::{GrayPix, Plane, RgbaPix, color};

/// Number of channels combined into one composite
pub const COMPOSITE_CHANNELS: usize = 3;

/// Colorize an 8-bit image through a ramp's lookup table.
pub fn colorize(gray: &GrayPix, ramp: &ColorRamp) -> ColorResult<RgbaPix> {
    let data = gray.data().iter().map(|&v| ramp.pixel(v)).collect();
    Ok(RgbaPix::from_data(gray.width(), gray.height(), data)?)
}

/// Per-pixel, per-component maximum of several RGBA images.
///
/// # Errors
///
/// - [`ColorError::Arity`] if `images` is empty
/// - [`ColorError::ShapeMismatch`] if the images differ in size
pub fn max_project(images: &[RgbaPix]) -> ColorResult<RgbaPix> {
    let (first, rest) = images.split_first().ok_or(ColorError::Arity {
        what: "images",
        expected: 1,
        actual: 0,
    })?;
    check_shapes(first.dimensions(), rest.iter().map(RgbaPix::dimensions))?;

    let mut out = first.to_mut();
    for image in rest {
        for (d, &s) in out.data_mut().iter_mut().zip(image.data()) {
            *d = color::max_components(*d, s);
        }
    }
    Ok(out.into())
}

/// Composite three channel planes into one RGBA image.
///
/// `images[i]` is windowed with `contrasts[i]` and colored with `ramps[i]`.
/// The call is pure: identical inputs give bit-identical output, and
/// permuting the `(image, ramp, contrast)` triples together does not change
/// the result.
///
/// # Errors
///
/// - [`ColorError::Arity`] unless exactly three images, ramps and contrasts
///   are given
/// - [`ColorError::ShapeMismatch`] if the images differ in size
pub fn composite(
    images: &[&Plane],
    ramps: &[&ColorRamp],
    contrasts: &[ContrastWindow],
) -> ColorResult<RgbaPix> {
    check_arity("images", images.len())?;
    check_arity("ramps", ramps.len())?;
    check_arity("contrasts", contrasts.len())?;
    check_shapes(images[0].dimensions(), images.iter().map(|p| p.dimensions()))?;

    let colored = images
        .iter()
        .zip(ramps)
        .zip(contrasts)
        .map(|((image, ramp), window)| colorize(&rescale_with_window(image, window)?, ramp))
        .collect::<ColorResult<Vec<_>>>()?;

    max_project(&colored)
}

fn check_arity(what: &'static str, actual: usize) -> ColorResult<()> {
    if actual != COMPOSITE_CHANNELS {
        return Err(ColorError::Arity {
            what,
            expected: COMPOSITE_CHANNELS,
            actual,
        });
    }
    Ok(())
}
