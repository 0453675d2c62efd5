//! Linear color ramps
//!
//! A [`ColorRamp`] maps an 8-bit display intensity to an RGB color through a
//! 256-entry lookup table. Every ramp in this crate is a straight line from
//! black at index 0 to a target color at index 255, which is how single
//! fluorescence channels are conventionally pseudo-colored.
//!
//! # Table construction
//!
//! Entry `i` of plane `c` is `target[c] * i / 255`, rounded half up in
//! integer arithmetic: `(target[c] * i + 127) / 255`. Index 0 is therefore
//! exactly black, index 255 exactly the target, and every plane is
//! non-decreasing.

use compcolor_core::color;

/// An RGB color with 8-bit components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Build a color from unit-range components.
    ///
    /// Values are clamped to [0, 1] and scaled to 0..=255, rounding half up.
    /// NaN is treated as 0.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        fn scale(v: f32) -> u8 {
            if v.is_nan() {
                return 0;
            }
            (v.clamp(0.0, 1.0) * 255.0 + 0.5).floor() as u8
        }
        Rgb::new(scale(r), scale(g), scale(b))
    }

    /// `#rrggbb` notation
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

/// Black-to-target lookup table
///
/// The table stores packed opaque pixels so colorizing is a single indexed
/// load per sample.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorRamp {
    target: Rgb,
    table: Box<[u32; 256]>,
}

impl ColorRamp {
    /// Build the linear ramp from black to `target`.
    pub fn linear(target: Rgb) -> Self {
        let mut table = Box::new([0u32; 256]);
        for (i, entry) in table.iter_mut().enumerate() {
            let i = i as u32;
            let lerp = |c: u8| ((u32::from(c) * i + 127) / 255) as u8;
            *entry = color::compose_rgb(lerp(target.r), lerp(target.g), lerp(target.b));
        }
        ColorRamp { target, table }
    }

    /// The color at full intensity, used wherever the ramp needs a single
    /// representative swatch (selector entries, histogram bars).
    #[inline]
    pub fn target(&self) -> Rgb {
        self.target
    }

    /// Packed opaque pixel for an 8-bit intensity
    #[inline]
    pub fn pixel(&self, value: u8) -> u32 {
        self.table[value as usize]
    }

    /// RGB triple for an 8-bit intensity
    #[inline]
    pub fn rgb(&self, value: u8) -> Rgb {
        color::extract_rgb(self.table[value as usize]).into()
    }

    /// Color for a normalized intensity in [0, 1]
    ///
    /// Out-of-range input is clamped; NaN maps to black.
    pub fn sample(&self, t: f32) -> Rgb {
        if t.is_nan() {
            return self.rgb(0);
        }
        self.rgb((t.clamp(0.0, 1.0) * 255.0 + 0.5).floor() as u8)
    }

    /// The full table of packed pixels
    #[inline]
    pub fn table(&self) -> &[u32; 256] {
        &self.table
    }
}

impl std::fmt::Debug for ColorRamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorRamp")
            .field("target", &self.target.to_hex())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for target in [Rgb::RED, Rgb::CYAN, Rgb::new(17, 200, 99)] {
            let ramp = ColorRamp::linear(target);
            assert_eq!(ramp.rgb(0), Rgb::BLACK);
            assert_eq!(ramp.rgb(255), target);
            assert_eq!(ramp.target(), target);
        }
    }

    #[test]
    fn test_midpoint_rounding() {
        let ramp = ColorRamp::linear(Rgb::new(255, 100, 1));
        // 255*128/255 = 128; 100*128/255 = 50.19 -> 50; 1*128/255 = 0.502 -> 1
        assert_eq!(ramp.rgb(128), Rgb::new(128, 50, 1));
        // 1*127/255 = 0.498 -> 0
        assert_eq!(ramp.rgb(127).b, 0);
    }

    #[test]
    fn test_table_is_opaque() {
        let ramp = ColorRamp::linear(Rgb::MAGENTA);
        assert!(ramp.table().iter().all(|&p| color::alpha(p) == 255));
    }

    #[test]
    fn test_sample_clamps() {
        let ramp = ColorRamp::linear(Rgb::GREEN);
        assert_eq!(ramp.sample(-1.0), Rgb::BLACK);
        assert_eq!(ramp.sample(2.0), Rgb::GREEN);
        assert_eq!(ramp.sample(f32::NAN), Rgb::BLACK);
        assert_eq!(ramp.sample(0.5).g, 128);
    }

    #[test]
    fn test_from_unit() {
        assert_eq!(Rgb::from_unit(1.0, 0.5, 0.0), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_unit(2.0, -1.0, f32::NAN), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::new(255, 0, 128).to_hex(), "#ff0080");
    }
}
