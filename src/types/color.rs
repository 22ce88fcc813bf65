//! Colour wheel values and named presets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Well-known positions on the bridge's 256 step colour wheel.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, EnumIter, PartialEq, Eq)]
pub enum ColorPreset {
    Red = 0xFF,
    Lavender = 0xD9,
    Blue = 0xBA,
    Aqua = 0x85,
    Green = 0x7A,
    Lime = 0x54,
    Yellow = 0x3B,
    Orange = 0x1E,
}

impl ColorPreset {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn create(value: u8) -> Option<Self> {
        ColorPreset::iter().find(|preset| preset.value() == value)
    }
}

impl FromStr for ColorPreset {
    type Err = String;

    /// Parse a preset name, ignoring case (e.g., "lavender").
    fn from_str(s: &str) -> Result<Self, String> {
        ColorPreset::iter()
            .find(|preset| format!("{:?}", preset).eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown colour preset: {}", s))
    }
}

/// Reduces any integer to a colour wheel position, keeping the low byte.
///
/// # Examples
///
/// ```
/// use milight_rs::color_value;
///
/// assert_eq!(color_value(0xFF), 0xFF);
/// assert_eq!(color_value(0x1BA), 0xBA);
/// ```
pub fn color_value(value: i64) -> u8 {
    (value & 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset() {
        assert_eq!(ColorPreset::from_str("Red").unwrap(), ColorPreset::Red);
        assert_eq!(ColorPreset::from_str("aqua").unwrap(), ColorPreset::Aqua);
        assert!(ColorPreset::from_str("magenta").is_err());
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(ColorPreset::create(0x7A), Some(ColorPreset::Green));
        assert!(ColorPreset::create(0x00).is_none());
    }

    #[test]
    fn test_color_value_masks() {
        assert_eq!(color_value(-1), 0xFF);
        assert_eq!(color_value(256), 0);
    }
}
