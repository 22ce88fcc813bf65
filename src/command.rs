//! Command payloads and the opcode table.
//!
//! Every request carries a 9 byte command: a prefix byte, two reserved bytes,
//! an addressing family byte, an opcode and four parameter bytes. The family
//! byte selects between the paired lights (`0x08`) and the lamp built into
//! the bridge itself (`0x00`); both share the same composition below.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::types::{DiscoMode, Percentage, Zone};

type Result<T> = std::result::Result<T, Error>;

/// A raw 9 byte command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command([u8; Command::LEN]);

impl Command {
    pub const LEN: usize = 9;

    pub fn new(bytes: [u8; Command::LEN]) -> Self {
        Command(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Command::LEN] {
        &self.0
    }

    fn compose(prefix: u8, family: u8, opcode: u8, params: [u8; 4]) -> Self {
        let [p0, p1, p2, p3] = params;
        Command([prefix, 0x00, 0x00, family, opcode, p0, p1, p2, p3])
    }
}

impl TryFrom<&[u8]> for Command {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        <[u8; Command::LEN]>::try_from(bytes)
            .map(Command)
            .map_err(|_| Error::InvalidCommandLength(bytes.len()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::frame::to_hex(&self.0))
    }
}

/// Where a command is delivered.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Paired lights in one zone, or every zone.
    Zone(Zone),
    /// The lamp built into the wifi bridge.
    BridgeLamp,
}

impl Target {
    const LIGHT_FAMILY: u8 = 0x08;
    const LAMP_FAMILY: u8 = 0x00;

    /// The bridge lamp always answers on slot 1, whatever zone the caller
    /// has in mind.
    const LAMP_ZONE_ID: u8 = 0x01;

    /// Zone byte placed in the request frame.
    pub fn zone_id(&self) -> u8 {
        match self {
            Target::Zone(zone) => zone.id(),
            Target::BridgeLamp => Self::LAMP_ZONE_ID,
        }
    }

    fn family(&self) -> u8 {
        match self {
            Target::Zone(_) => Self::LIGHT_FAMILY,
            Target::BridgeLamp => Self::LAMP_FAMILY,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Zone(zone) => write!(f, "{}", zone),
            Target::BridgeLamp => write!(f, "bridge lamp"),
        }
    }
}

/// Something the bridge can be asked to do.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    On,
    Off,
    NightMode,
    WhiteMode,
    Color(u8),
    Brightness(Percentage),
    Saturation(Percentage),
    Temperature(Percentage),
    DiscoMode(DiscoMode),
    DiscoSpeedUp,
    DiscoSlowDown,
    Link,
    Unlink,
}

impl Action {
    const CONTROL: u8 = 0x31;
    const LINK: u8 = 0x3D;
    const UNLINK: u8 = 0x3E;

    /// Encode this action for a target.
    ///
    /// The table is fixed by the bridge firmware. The bridge lamp has no
    /// saturation, temperature, night mode or pairing opcodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use milight_rs::{Action, Target, Zone};
    ///
    /// let on = Action::On.command(Target::Zone(Zone::One)).unwrap();
    /// assert_eq!(on.as_bytes(), &[0x31, 0x00, 0x00, 0x08, 0x04, 0x01, 0x00, 0x00, 0x00]);
    /// assert!(Action::Link.command(Target::BridgeLamp).is_err());
    /// ```
    pub fn command(&self, target: Target) -> Result<Command> {
        let family = target.family();
        let lamp = matches!(target, Target::BridgeLamp);
        let control = |opcode: u8, param: u8| -> Result<Command> {
            Ok(Command::compose(Self::CONTROL, family, opcode, [param, 0, 0, 0]))
        };

        match (*self, lamp) {
            (Action::On, false) => control(0x04, 0x01),
            (Action::On, true) => control(0x03, 0x03),
            (Action::Off, false) => control(0x04, 0x02),
            (Action::Off, true) => control(0x03, 0x04),
            (Action::NightMode, false) => control(0x04, 0x05),
            (Action::WhiteMode, false) => control(0x05, 0x64),
            (Action::WhiteMode, true) => control(0x03, 0x05),
            (Action::DiscoSpeedUp, false) => control(0x04, 0x03),
            (Action::DiscoSpeedUp, true) => control(0x03, 0x02),
            (Action::DiscoSlowDown, false) => control(0x04, 0x04),
            (Action::DiscoSlowDown, true) => control(0x03, 0x01),
            (Action::Color(c), _) => Ok(Command::compose(
                Self::CONTROL,
                family,
                0x01,
                [c, c, c, c],
            )),
            (Action::Brightness(b), false) => control(0x03, b.value()),
            (Action::Brightness(b), true) => control(0x02, b.value()),
            (Action::Saturation(s), false) => control(0x02, s.value()),
            (Action::Temperature(t), false) => control(0x05, t.value()),
            (Action::DiscoMode(m), false) => control(0x06, m.id()),
            (Action::DiscoMode(m), true) => control(0x04, m.id()),
            (Action::Link, false) => Ok(Command::compose(Self::LINK, family, 0x00, [0; 4])),
            (Action::Unlink, false) => Ok(Command::compose(Self::UNLINK, family, 0x00, [0; 4])),
            (action, true) => Err(Error::unsupported(action, target)),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::On => write!(f, "turn on"),
            Action::Off => write!(f, "turn off"),
            Action::NightMode => write!(f, "night mode"),
            Action::WhiteMode => write!(f, "white mode"),
            Action::Color(c) => write!(f, "colour {:#04x}", c),
            Action::Brightness(b) => write!(f, "brightness {}%", b.value()),
            Action::Saturation(s) => write!(f, "saturation {}%", s.value()),
            Action::Temperature(t) => {
                write!(f, "temperature {}% ({}K)", t.value(), t.approx_kelvin())
            }
            Action::DiscoMode(m) => write!(f, "disco mode {}", m.id()),
            Action::DiscoSpeedUp => write!(f, "disco speed up"),
            Action::DiscoSlowDown => write!(f, "disco slow down"),
            Action::Link => write!(f, "link"),
            Action::Unlink => write!(f, "unlink"),
        }
    }
}
