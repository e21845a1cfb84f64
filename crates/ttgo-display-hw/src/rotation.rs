//! Display rotation support.
//!
//! The firmware takes rotation as a code from 0 to 3, each step turning the
//! display a further 90 degrees.

use crate::{Error, Result, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use std::str::FromStr;

/// Display rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// Native orientation.
    #[default]
    Deg0,
    /// Rotated a quarter turn.
    Deg90,
    /// Upside-down.
    Deg180,
    /// Rotated three quarter turns.
    Deg270,
}

impl Rotation {
    /// All rotations in ascending order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Maps logical degrees to a rotation. Unrecognized values fall back to 0.
    pub fn from_degrees(degrees: u32) -> Self {
        match degrees {
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            270 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    /// Returns the logical degrees.
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Returns the device rotation code.
    pub fn code(&self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Returns the display dimensions for this rotation.
    pub fn dimensions(&self) -> (u16, u16) {
        match self {
            Rotation::Deg0 | Rotation::Deg180 => (DISPLAY_WIDTH, DISPLAY_HEIGHT),
            Rotation::Deg90 | Rotation::Deg270 => (DISPLAY_HEIGHT, DISPLAY_WIDTH),
        }
    }
}

impl FromStr for Rotation {
    type Err = Error;

    /// Parses degrees (`"90"`) or a name (`"portrait"`, `"landscape"`, ...).
    /// Unlike [`Rotation::from_degrees`], unknown input is rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "0" | "portrait" => Ok(Rotation::Deg0),
            "90" | "landscape" => Ok(Rotation::Deg90),
            "180" | "portrait-upside-down" | "portrait_upside_down" => Ok(Rotation::Deg180),
            "270" | "landscape-upside-down" | "landscape_upside_down" => Ok(Rotation::Deg270),
            _ => Err(Error::InvalidRotation(s.to_string())),
        }
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_to_code() {
        assert_eq!(Rotation::from_degrees(0).code(), 0);
        assert_eq!(Rotation::from_degrees(90).code(), 1);
        assert_eq!(Rotation::from_degrees(180).code(), 2);
        assert_eq!(Rotation::from_degrees(270).code(), 3);
    }

    #[test]
    fn test_unknown_degrees_default_to_zero() {
        for degrees in [1, 45, 89, 91, 360, 450, u32::MAX] {
            assert_eq!(Rotation::from_degrees(degrees).code(), 0);
        }
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(Rotation::Deg0.dimensions(), (240, 320));
        assert_eq!(Rotation::Deg270.dimensions(), (320, 240));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("270".parse::<Rotation>().unwrap(), Rotation::Deg270);
        assert_eq!("landscape".parse::<Rotation>().unwrap(), Rotation::Deg90);
        assert_eq!(
            "portrait-upside-down".parse::<Rotation>().unwrap(),
            Rotation::Deg180
        );
        assert!("sideways".parse::<Rotation>().is_err());
    }
}
