//! Per-slot channel configuration
//!
//! A [`ChannelConfig`] holds, for each of the three compositing slots, the
//! name of the ramp that colors it and its contrast window. It only stores
//! names; whether a name exists is checked against a [`Palette`] when the
//! ramps are resolved.

use crate::composite::COMPOSITE_CHANNELS;
use crate::palette::Palette;
use crate::ramp::ColorRamp;
use crate::rescale::ContrastWindow;
use crate::{ColorError, ColorResult};

/// Setting of one compositing slot
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSetting {
    /// Palette name of the ramp
    pub ramp: String,
    /// Contrast window in raw (or normalized) units
    pub contrast: ContrastWindow,
}

impl ChannelSetting {
    pub fn new(ramp: &str, contrast: ContrastWindow) -> Self {
        ChannelSetting {
            ramp: ramp.to_string(),
            contrast,
        }
    }
}

/// Ramp and contrast assignment for the three compositing slots
///
/// Defaults to Red, Green and Blue with the full `(0, 255)` window.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelConfig {
    slots: [ChannelSetting; COMPOSITE_CHANNELS],
}

impl ChannelConfig {
    /// Create a config from explicit slot settings
    pub fn new(slots: [ChannelSetting; COMPOSITE_CHANNELS]) -> Self {
        ChannelConfig { slots }
    }

    /// All slot settings
    #[inline]
    pub fn slots(&self) -> &[ChannelSetting; COMPOSITE_CHANNELS] {
        &self.slots
    }

    /// Setting of one slot.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Arity`] if `slot >= 3`.
    pub fn slot(&self, slot: usize) -> ColorResult<&ChannelSetting> {
        self.slots.get(slot).ok_or_else(|| slot_error(slot))
    }

    fn slot_mut(&mut self, slot: usize) -> ColorResult<&mut ChannelSetting> {
        self.slots.get_mut(slot).ok_or_else(|| slot_error(slot))
    }

    /// Assign a ramp name to a slot without checking the palette.
    pub fn set_ramp(&mut self, slot: usize, name: &str) -> ColorResult<()> {
        self.slot_mut(slot)?.ramp = name.to_string();
        Ok(())
    }

    /// Set a slot's contrast window.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidRange`] if `low >= high`; the slot keeps its
    /// previous window.
    pub fn set_contrast(&mut self, slot: usize, low: f32, high: f32) -> ColorResult<()> {
        let window = ContrastWindow::new(low, high)?;
        self.slot_mut(slot)?.contrast = window;
        Ok(())
    }

    /// The three contrast windows in slot order
    pub fn contrasts(&self) -> [ContrastWindow; COMPOSITE_CHANNELS] {
        [
            self.slots[0].contrast,
            self.slots[1].contrast,
            self.slots[2].contrast,
        ]
    }

    /// Look up the three ramps in `palette`.
    ///
    /// # Errors
    ///
    /// [`ColorError::UnknownRamp`] for the first slot whose name is missing.
    pub fn resolve_ramps<'a>(
        &self,
        palette: &'a Palette,
    ) -> ColorResult<[&'a ColorRamp; COMPOSITE_CHANNELS]> {
        Ok([
            palette.get(&self.slots[0].ramp)?,
            palette.get(&self.slots[1].ramp)?,
            palette.get(&self.slots[2].ramp)?,
        ])
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        ChannelConfig::new([
            ChannelSetting::new("Red", ContrastWindow::FULL_RANGE),
            ChannelSetting::new("Green", ContrastWindow::FULL_RANGE),
            ChannelSetting::new("Blue", ContrastWindow::FULL_RANGE),
        ])
    }
}

fn slot_error(slot: usize) -> ColorError {
    ColorError::Arity {
        what: "slots",
        expected: COMPOSITE_CHANNELS,
        actual: slot.saturating_add(1),
    }
}
