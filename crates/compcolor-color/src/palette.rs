//! Palette of named color ramps
//!
//! The palette starts with five built-in ramps and grows as users pick new
//! colors. It is append-only: entries are never removed and a ramp never
//! changes once registered, so a name handed out to a channel slot stays
//! valid for the lifetime of the session. Insertion order is preserved and
//! is the order a selector widget should list the ramps in.

use crate::ramp::{ColorRamp, Rgb};
use crate::{ColorError, ColorResult};
use log::debug;

/// Names and targets of the ramps every palette starts with
pub const BUILTIN_RAMPS: [(&str, Rgb); 5] = [
    ("Red", Rgb::RED),
    ("Green", Rgb::GREEN),
    ("Blue", Rgb::BLUE),
    ("Cyan", Rgb::CYAN),
    ("Magenta", Rgb::MAGENTA),
];

/// Prefix of names generated by [`Palette::build_ramp`]
const CUSTOM_PREFIX: &str = "custom";

/// Ordered, append-only collection of named ramps
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<(String, ColorRamp)>,
    custom_count: usize,
}

impl Palette {
    /// Palette holding only the built-in ramps
    pub fn new() -> Self {
        let entries = BUILTIN_RAMPS
            .iter()
            .map(|&(name, target)| (name.to_string(), ColorRamp::linear(target)))
            .collect();
        Palette {
            entries,
            custom_count: 0,
        }
    }

    /// Number of ramps
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a ramp is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Look up a ramp by name.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::UnknownRamp`] if no ramp has that name.
    pub fn get(&self, name: &str) -> ColorResult<&ColorRamp> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ramp)| ramp)
            .ok_or_else(|| ColorError::UnknownRamp(name.to_string()))
    }

    /// Ramp names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, ramp)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorRamp)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Register a ramp under a caller-chosen name.
    ///
    /// # Errors
    ///
    /// - [`ColorError::DuplicateRamp`] if the name is already taken
    /// - [`ColorError::InvalidParameters`] if the name is empty
    pub fn insert(&mut self, name: &str, ramp: ColorRamp) -> ColorResult<()> {
        if name.is_empty() {
            return Err(ColorError::InvalidParameters(
                "ramp name must not be empty".to_string(),
            ));
        }
        if self.contains(name) {
            return Err(ColorError::DuplicateRamp(name.to_string()));
        }
        debug!("palette: added ramp {name} ({})", ramp.target().to_hex());
        self.entries.push((name.to_string(), ramp));
        Ok(())
    }

    /// Build the linear ramp for `target` and register it under a fresh
    /// name (`custom-1`, `custom-2`, ...). Returns the new name.
    pub fn build_ramp(&mut self, target: Rgb) -> String {
        let name = loop {
            self.custom_count += 1;
            let candidate = format!("{CUSTOM_PREFIX}-{}", self.custom_count);
            if !self.contains(&candidate) {
                break candidate;
            }
        };
        debug!("palette: added ramp {name} ({})", target.to_hex());
        self.entries.push((name.clone(), ColorRamp::linear(target)));
        name
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let palette = Palette::new();
        assert_eq!(palette.len(), 5);
        let names: Vec<_> = palette.names().collect();
        assert_eq!(names, ["Red", "Green", "Blue", "Cyan", "Magenta"]);
        assert_eq!(palette.get("Cyan").unwrap().target(), Rgb::CYAN);
    }

    #[test]
    fn test_unknown_ramp() {
        let palette = Palette::new();
        assert!(matches!(
            palette.get("Yellow"),
            Err(ColorError::UnknownRamp(name)) if name == "Yellow"
        ));
    }

    #[test]
    fn test_build_ramp_names_are_fresh() {
        let mut palette = Palette::new();
        palette
            .insert("custom-1", ColorRamp::linear(Rgb::GRAY))
            .unwrap();
        let name = palette.build_ramp(Rgb::new(255, 128, 0));
        assert_eq!(name, "custom-2");
        assert_eq!(palette.build_ramp(Rgb::new(255, 128, 0)), "custom-3");
        assert_eq!(palette.len(), 8);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut palette = Palette::new();
        assert!(matches!(
            palette.insert("Red", ColorRamp::linear(Rgb::GRAY)),
            Err(ColorError::DuplicateRamp(_))
        ));
        assert!(palette.insert("", ColorRamp::linear(Rgb::GRAY)).is_err());
        assert_eq!(palette.get("Red").unwrap().target(), Rgb::RED);
    }
}
