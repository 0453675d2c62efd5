//! Render session state
//!
//! A [`RenderSession`] bundles everything that persists between composite
//! calls during one interactive session: the palette and the per-slot
//! channel configuration. The compositor never keeps state of its own; it
//! receives the session explicitly on each call.

use crate::composite::{COMPOSITE_CHANNELS, composite};
use crate::config::ChannelConfig;
use crate::palette::Palette;
use crate::ramp::{ColorRamp, Rgb};
use crate::rescale::normalize_joint;
use crate::{ColorError, ColorResult};
use compcolor_core::{Plane, RgbaPix};

/// How raw samples are brought into contrast-window units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Contrast windows are in raw detector units
    #[default]
    None,
    /// The composited channels of each time slice are stretched together so
    /// their joint min/max span 0..=255 before windowing
    JointMinMax,
}

/// Palette plus channel configuration
#[derive(Debug, Clone, Default)]
pub struct RenderSession {
    palette: Palette,
    config: ChannelConfig,
    normalization: Normalization,
}

impl RenderSession {
    /// Session with the built-in palette and default channel config
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with an explicit config, checked against the built-in palette.
    pub fn with_config(config: ChannelConfig) -> ColorResult<Self> {
        let palette = Palette::new();
        config.resolve_ramps(&palette)?;
        Ok(RenderSession {
            palette,
            config,
            normalization: Normalization::None,
        })
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    #[inline]
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn set_normalization(&mut self, normalization: Normalization) {
        self.normalization = normalization;
    }

    /// Assign a palette ramp to a slot.
    ///
    /// # Errors
    ///
    /// - [`ColorError::UnknownRamp`] if the palette has no such ramp
    /// - [`ColorError::Arity`] if `slot >= 3`
    pub fn set_ramp(&mut self, slot: usize, name: &str) -> ColorResult<()> {
        self.palette.get(name)?;
        self.config.set_ramp(slot, name)
    }

    /// Set a slot's contrast window.
    pub fn set_contrast(&mut self, slot: usize, low: f32, high: f32) -> ColorResult<()> {
        self.config.set_contrast(slot, low, high)
    }

    /// Add a ramp for a user-picked color; returns its palette name.
    pub fn build_ramp(&mut self, target: Rgb) -> String {
        self.palette.build_ramp(target)
    }

    /// Ramps currently assigned to the three slots
    pub fn resolve_ramps(&self) -> ColorResult<[&ColorRamp; COMPOSITE_CHANNELS]> {
        self.config.resolve_ramps(&self.palette)
    }

    /// Representative color of the ramp in `slot`
    pub fn slot_color(&self, slot: usize) -> ColorResult<Rgb> {
        let setting = self.config.slot(slot)?;
        Ok(self.palette.get(&setting.ramp)?.target())
    }

    /// Composite the first three channels of a time slice.
    ///
    /// Extra channels are ignored.
    ///
    /// # Errors
    ///
    /// - [`ColorError::Arity`] if fewer than three channels are given
    /// - [`ColorError::UnknownRamp`] if a slot names a missing ramp
    /// - [`ColorError::ShapeMismatch`] if the channels differ in size
    pub fn render(&self, channels: &[Plane]) -> ColorResult<RgbaPix> {
        if channels.len() < COMPOSITE_CHANNELS {
            return Err(ColorError::Arity {
                what: "channels",
                expected: COMPOSITE_CHANNELS,
                actual: channels.len(),
            });
        }
        let ramps = self.resolve_ramps()?;
        let contrasts = self.config.contrasts();
        let planes = [&channels[0], &channels[1], &channels[2]];

        match self.normalization {
            Normalization::None => composite(&planes, &ramps, &contrasts),
            Normalization::JointMinMax => {
                let stretched = normalize_joint(&planes)?;
                let refs: Vec<&Plane> = stretched.iter().collect();
                composite(&refs, &ramps, &contrasts)
            }
        }
    }
}
