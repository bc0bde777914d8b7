//! Named viewport sizes a window can be opened at or resized to.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetSize {
    pub name: &'static str,
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for PresetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered, closed list of phone-sized viewports.
pub const PRESET_SIZES: [PresetSize; 3] = [
    PresetSize {
        name: "360×640",
        width: 360.0,
        height: 640.0,
    },
    PresetSize {
        name: "390×844",
        width: 390.0,
        height: 844.0,
    },
    PresetSize {
        name: "414×896",
        width: 414.0,
        height: 896.0,
    },
];

/// Look a preset up by name.
///
/// Besides the canonical `360×640` form, the ASCII spelling `360x640` is
/// accepted so presets can be typed on a plain keyboard.
pub fn preset_by_name(name: &str) -> Option<PresetSize> {
    let wanted = name.trim().replace(['x', 'X'], "×");
    PRESET_SIZES.iter().copied().find(|p| p.name == wanted)
}
