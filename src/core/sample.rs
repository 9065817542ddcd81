//! Validated 3-bit sensor samples.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of distinct sensor samples; the width of every `next` array.
pub const SAMPLE_VALUES: usize = 8;

const NORTH_SOUTH_BIT: u8 = 0b001;
const EAST_WEST_BIT: u8 = 0b010;
const PEDESTRIAN_BIT: u8 = 0b100;

/// Errors raised when a raw reading cannot be used as a sensor sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("sensor sample {value} is outside 0..=7")]
    OutOfRangeInput { value: i64 },
}

/// A packed reading of the three intersection sensors.
///
/// Bit 0 is the north/south car detector, bit 1 the east/west car
/// detector and bit 2 the pedestrian request button. Values are always in
/// `0..=7`; out-of-range readings are rejected at conversion time rather
/// than masked.
///
/// # Example
///
/// ```rust
/// use traffic_fsm::core::{InputError, SensorSample};
///
/// let sample = SensorSample::from_sensors(true, false, true);
/// assert_eq!(sample.value(), 0b101);
/// assert!(sample.pedestrian());
///
/// assert_eq!(
///     SensorSample::try_from(8i32),
///     Err(InputError::OutOfRangeInput { value: 8 })
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SensorSample(u8);

impl SensorSample {
    /// Sample with no sensor active.
    pub const IDLE: Self = Self(0);

    /// Pack three independent sensor readings.
    pub fn from_sensors(north_south: bool, east_west: bool, pedestrian: bool) -> Self {
        let mut bits = 0;
        if north_south {
            bits |= NORTH_SOUTH_BIT;
        }
        if east_west {
            bits |= EAST_WEST_BIT;
        }
        if pedestrian {
            bits |= PEDESTRIAN_BIT;
        }
        Self(bits)
    }

    /// Every possible sample, in ascending order.
    pub fn all() -> impl Iterator<Item = SensorSample> {
        (0..SAMPLE_VALUES as u8).map(Self)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Index into a `next` array.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn north_south(self) -> bool {
        self.0 & NORTH_SOUTH_BIT != 0
    }

    pub fn east_west(self) -> bool {
        self.0 & EAST_WEST_BIT != 0
    }

    pub fn pedestrian(self) -> bool {
        self.0 & PEDESTRIAN_BIT != 0
    }

    /// True if either car detector is active.
    pub fn has_car(self) -> bool {
        self.north_south() || self.east_west()
    }
}

impl TryFrom<u8> for SensorSample {
    type Error = InputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if usize::from(value) < SAMPLE_VALUES {
            Ok(Self(value))
        } else {
            Err(InputError::OutOfRangeInput {
                value: i64::from(value),
            })
        }
    }
}

impl TryFrom<i32> for SensorSample {
    type Error = InputError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| usize::from(*v) < SAMPLE_VALUES)
            .map(Self)
            .ok_or(InputError::OutOfRangeInput {
                value: i64::from(value),
            })
    }
}

impl From<SensorSample> for u8 {
    fn from(sample: SensorSample) -> Self {
        sample.0
    }
}

impl fmt::Display for SensorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03b}", self.0)
    }
}
