//! Light zones addressed by the bridge.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::errors::Error;

/// A group of lights paired with the bridge.
///
/// Zones 1 to 4 address a single group; [`Zone::All`] (id 0) broadcasts to
/// every group at once.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, EnumIter, PartialEq, Eq, Hash)]
pub enum Zone {
    All = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl Zone {
    /// Raw zone id as carried in a command frame.
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Returns None if the id is outside 0-4.
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::Zone;
    ///
    /// assert_eq!(Zone::create(0), Some(Zone::All));
    /// assert_eq!(Zone::create(4), Some(Zone::Four));
    /// assert!(Zone::create(5).is_none());
    /// ```
    pub fn create(id: u8) -> Option<Self> {
        Zone::iter().find(|zone| zone.id() == id)
    }
}

impl TryFrom<u8> for Zone {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Error> {
        Zone::create(id).ok_or(Error::InvalidZone(id))
    }
}

impl From<Zone> for u8 {
    fn from(zone: Zone) -> u8 {
        zone.id()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::All => write!(f, "all zones"),
            zone => write!(f, "zone {}", zone.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for zone in Zone::iter() {
            assert_eq!(Zone::try_from(zone.id()).unwrap(), zone);
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(Zone::try_from(5).unwrap_err(), Error::InvalidZone(5));
        assert_eq!(Zone::try_from(255).unwrap_err(), Error::InvalidZone(255));
    }

    #[test]
    fn test_display() {
        assert_eq!(Zone::All.to_string(), "all zones");
        assert_eq!(Zone::Three.to_string(), "zone 3");
    }
}
