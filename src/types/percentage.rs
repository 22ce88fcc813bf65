//! Percentage parameters (brightness, saturation, temperature).

use serde::{Deserialize, Serialize};

/// A percentage from 0 to 100, used for brightness, saturation and white
/// temperature.
///
/// Out of range input is clamped rather than rejected, which is how the
/// bridge expects the parameter byte to be filled. Deserialized values go
/// through the same clamp.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(from = "i64", into = "u8")]
pub struct Percentage {
    pub(crate) value: u8,
}

impl Percentage {
    const MIN: i32 = 0;
    const MAX: i32 = 100;

    const KELVIN_WARM: u16 = 2700;
    const KELVIN_PER_PERCENT: u16 = 38;

    /// Create a percentage, clamping to 0-100.
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::Percentage;
    ///
    /// assert_eq!(Percentage::clamped(-5).value(), 0);
    /// assert_eq!(Percentage::clamped(42).value(), 42);
    /// assert_eq!(Percentage::clamped(250).value(), 100);
    /// ```
    pub fn clamped(value: i32) -> Self {
        Percentage {
            value: value.clamp(Self::MIN, Self::MAX) as u8,
        }
    }

    /// Returns None if value is outside 0-100.
    pub fn create(value: u8) -> Option<Self> {
        if i32::from(value) <= Self::MAX {
            Some(Percentage { value })
        } else {
            None
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Approximate colour temperature when used as a white temperature
    /// (0% is 2700K, 100% is 6500K).
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::Percentage;
    ///
    /// assert_eq!(Percentage::clamped(0).approx_kelvin(), 2700);
    /// assert_eq!(Percentage::clamped(100).approx_kelvin(), 6500);
    /// ```
    pub fn approx_kelvin(&self) -> u16 {
        Self::KELVIN_WARM + Self::KELVIN_PER_PERCENT * u16::from(self.value)
    }
}

impl From<i64> for Percentage {
    fn from(value: i64) -> Self {
        Percentage::clamped(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }
}

impl From<Percentage> for u8 {
    fn from(value: Percentage) -> Self {
        value.value
    }
}
