//! Intensity windowing
//!
//! Maps raw detector samples onto the 8-bit display range:
//!
//! - [`rescale_intensity`]: an explicit `(low, high)` contrast window
//! - [`rescale_to_image_range`]: the plane's own min/max as the window
//! - [`normalize_joint`]: several planes stretched together into 0..=255
//!
//! # Rounding
//!
//! Interior values are rounded half up: `floor(x + 0.5)` where `x` is the
//! exact linear position in 0..=255. Samples at or below `low` map to 0,
//! samples at or above `high` map to 255, NaN maps to 0.

use crate::{ColorError, ColorResult};
use compcolor_core::{GrayPix, Plane};

/// Validated contrast window: `low < high`, both finite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastWindow {
    low: f32,
    high: f32,
}

impl ContrastWindow {
    /// The full 8-bit display range, `(0, 255)`
    pub const FULL_RANGE: ContrastWindow = ContrastWindow {
        low: 0.0,
        high: 255.0,
    };

    /// Create a window.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidRange`] if `low >= high` or either bound
    /// is not finite. An empty window (`low == high`) is rejected rather than
    /// treated as a threshold.
    pub fn new(low: f32, high: f32) -> ColorResult<Self> {
        if !(low.is_finite() && high.is_finite()) || low >= high {
            return Err(ColorError::InvalidRange { low, high });
        }
        Ok(ContrastWindow { low, high })
    }

    #[inline]
    pub fn low(&self) -> f32 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> f32 {
        self.high
    }

    /// Display value of one sample
    #[inline]
    pub fn map(&self, value: f32) -> u8 {
        if value.is_nan() || value <= self.low {
            return 0;
        }
        if value >= self.high {
            return 255;
        }
        let low = f64::from(self.low);
        let span = f64::from(self.high) - low;
        let scaled = (f64::from(value) - low) * 255.0 / span;
        (scaled + 0.5).floor().min(255.0) as u8
    }
}

impl Default for ContrastWindow {
    fn default() -> Self {
        Self::FULL_RANGE
    }
}

impl TryFrom<(f32, f32)> for ContrastWindow {
    type Error = ColorError;

    fn try_from((low, high): (f32, f32)) -> ColorResult<Self> {
        ContrastWindow::new(low, high)
    }
}

/// Linearly map `[low, high]` onto `[0, 255]`, clamping outside values.
///
/// # Errors
///
/// Returns [`ColorError::InvalidRange`] if `low >= high` or a bound is not
/// finite.
///
/// # Examples
///
/// ```
/// use compcolor_color::rescale_intensity;
/// use compcolor_core::Plane;
///
/// let plane = Plane::from_data(5, 1, vec![0.0, 50.0, 100.0, 200.0, 255.0]).unwrap();
/// let gray = rescale_intensity(&plane, 50.0, 200.0).unwrap();
/// assert_eq!(gray.data(), &[0, 0, 85, 255, 255]);
/// ```
pub fn rescale_intensity(plane: &Plane, low: f32, high: f32) -> ColorResult<GrayPix> {
    let window = ContrastWindow::new(low, high)?;
    rescale_with_window(plane, &window)
}

/// [`rescale_intensity`] with an already validated window
pub fn rescale_with_window(plane: &Plane, window: &ContrastWindow) -> ColorResult<GrayPix> {
    let data = plane.data().iter().map(|&v| window.map(v)).collect();
    Ok(GrayPix::from_data(plane.width(), plane.height(), data)?)
}

/// Rescale using the plane's own min/max as the window.
///
/// A constant plane has no usable window and maps to all zeros.
pub fn rescale_to_image_range(plane: &Plane) -> ColorResult<GrayPix> {
    let (lo, hi) = plane.min_max();
    match ContrastWindow::new(lo, hi) {
        Ok(window) => rescale_with_window(plane, &window),
        Err(_) => Ok(GrayPix::new(plane.width(), plane.height())?),
    }
}

/// Stretch several planes together so their joint min/max span 0..=255.
///
/// The relative brightness of the planes is preserved. Results are rounded
/// half up to whole display levels, but kept as [`Plane`]s so that contrast
/// windows in display units can be applied afterwards. If every sample has
/// the same value the output planes are all zero.
///
/// # Errors
///
/// - [`ColorError::Arity`] for an empty input
/// - [`ColorError::ShapeMismatch`] if the planes differ in size
pub fn normalize_joint(planes: &[&Plane]) -> ColorResult<Vec<Plane>> {
    let first = planes.first().ok_or(ColorError::Arity {
        what: "planes",
        expected: 1,
        actual: 0,
    })?;
    check_shapes(first.dimensions(), planes.iter().map(|p| p.dimensions()))?;

    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for plane in planes {
        let (a, b) = plane.min_max();
        lo = lo.min(a);
        hi = hi.max(b);
    }

    let window = ContrastWindow::new(lo, hi).ok();
    planes
        .iter()
        .map(|plane| -> ColorResult<Plane> {
            let data = match &window {
                Some(w) => plane.data().iter().map(|&v| f32::from(w.map(v))).collect(),
                None => vec![0.0; plane.data().len()],
            };
            Ok(Plane::from_data(plane.width(), plane.height(), data)?)
        })
        .collect()
}

/// Check that every size in `sizes` equals `expected`.
pub(crate) fn check_shapes(
    expected: (u32, u32),
    sizes: impl IntoIterator<Item = (u32, u32)>,
) -> ColorResult<()> {
    for actual in sizes {
        if actual != expected {
            return Err(ColorError::ShapeMismatch { expected, actual });
        }
    }
    Ok(())
}
