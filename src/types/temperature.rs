//! White temperature presets.

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use super::Percentage;

/// Common white temperatures, expressed as the percentage the bridge expects.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, EnumIter, PartialEq, Eq)]
pub enum TemperaturePreset {
    /// 2700K
    Warm = 0,
    /// 3000K
    WarmWhite = 8,
    /// 4000K
    CoolWhite = 35,
    /// 5000K
    Daylight = 61,
    /// 6500K
    CoolDaylight = 100,
}

impl TemperaturePreset {
    pub fn percentage(&self) -> Percentage {
        Percentage::clamped(*self as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_presets_are_ordered_warm_to_cool() {
        let kelvins: Vec<u16> = TemperaturePreset::iter()
            .map(|p| p.percentage().approx_kelvin())
            .collect();
        assert!(kelvins.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(TemperaturePreset::Warm.percentage().value(), 0);
        assert_eq!(TemperaturePreset::CoolDaylight.percentage().value(), 100);
    }
}
