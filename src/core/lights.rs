//! Light output masks.
//!
//! The vehicle signals form a 6-bit mask and the pedestrian signals a
//! 2-bit mask. Both serialize as plain integers; bits outside the mask
//! are rejected on load instead of being truncated.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Errors raised when a raw value does not fit a light mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LightsError {
    #[error("bits {bits:#04x} fall outside the {width}-bit {mask} mask")]
    UnknownBits {
        mask: &'static str,
        bits: u8,
        width: u32,
    },
}

bitflags::bitflags! {
    /// Vehicle signals for the west and south approaches.
    ///
    /// Bits 5..3 drive the west red/yellow/green lamps, bits 2..0 the
    /// south red/yellow/green lamps.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct PrimaryLights: u8 {
        const WEST_RED     = 0b10_0000;
        const WEST_YELLOW  = 0b01_0000;
        const WEST_GREEN   = 0b00_1000;
        const SOUTH_RED    = 0b00_0100;
        const SOUTH_YELLOW = 0b00_0010;
        const SOUTH_GREEN  = 0b00_0001;

        const ALL_RED = Self::WEST_RED.bits() | Self::SOUTH_RED.bits();
    }
}

bitflags::bitflags! {
    /// Pedestrian signals. An empty mask means both lamps are dark.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct PedestrianLights: u8 {
        const DONT_WALK = 0b01;
        const WALK      = 0b10;
    }
}

impl PrimaryLights {
    const WIDTH: u32 = 6;

    /// Decode a raw mask, rejecting unknown bits.
    pub fn try_from_bits(bits: u8) -> Result<Self, LightsError> {
        Self::from_bits(bits).ok_or(LightsError::UnknownBits {
            mask: "primary",
            bits,
            width: Self::WIDTH,
        })
    }
}

impl PedestrianLights {
    /// Both lamps dark, the off phase of the don't-walk flash.
    pub const OFF: Self = Self::empty();

    const WIDTH: u32 = 2;

    /// Decode a raw mask, rejecting unknown bits.
    pub fn try_from_bits(bits: u8) -> Result<Self, LightsError> {
        Self::from_bits(bits).ok_or(LightsError::UnknownBits {
            mask: "pedestrian",
            bits,
            width: Self::WIDTH,
        })
    }
}

macro_rules! impl_mask_serde {
    ($mask:ty) => {
        impl Serialize for $mask {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.bits())
            }
        }

        impl<'de> Deserialize<'de> for $mask {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let bits = u8::deserialize(deserializer)?;
                <$mask>::try_from_bits(bits).map_err(de::Error::custom)
            }
        }

        impl fmt::Display for $mask {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:#04x}", self.bits())
            }
        }
    };
}

impl_mask_serde!(PrimaryLights);
impl_mask_serde!(PedestrianLights);
