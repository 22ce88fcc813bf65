//! Built-in colour cycling animations.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// One of the nine preset disco animations stored in the lights.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, EnumIter, PartialEq, Eq)]
pub enum DiscoMode {
    Mode1 = 1,
    Mode2 = 2,
    Mode3 = 3,
    Mode4 = 4,
    Mode5 = 5,
    Mode6 = 6,
    Mode7 = 7,
    Mode8 = 8,
    Mode9 = 9,
}

impl DiscoMode {
    const MIN: i32 = 1;
    const MAX: i32 = 9;

    /// Create a disco mode, clamping to 1-9.
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::DiscoMode;
    ///
    /// assert_eq!(DiscoMode::clamped(0), DiscoMode::Mode1);
    /// assert_eq!(DiscoMode::clamped(4), DiscoMode::Mode4);
    /// assert_eq!(DiscoMode::clamped(12), DiscoMode::Mode9);
    /// ```
    pub fn clamped(mode: i32) -> Self {
        let id = mode.clamp(Self::MIN, Self::MAX) as u8;
        Self::create(id).unwrap_or(DiscoMode::Mode1)
    }

    /// Returns None if mode is outside 1-9.
    pub fn create(mode: u8) -> Option<Self> {
        DiscoMode::iter().find(|m| m.id() == mode)
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }
}
