//! Register layout of the reference board.
//!
//! Vehicle lamps sit on port B bits 5..0 in the same order as
//! `PrimaryLights`. The pedestrian lamps sit on port F: PF1 is don't-walk
//! and PF3 is walk. The three sensors are port E bits 2..0.

use crate::core::{InputError, PedestrianLights, PrimaryLights, SensorSample};

/// Port F bit driving the don't-walk lamp.
pub const PORT_F_DONT_WALK: u8 = 0x02;
/// Port F bit driving the walk lamp.
pub const PORT_F_WALK: u8 = 0x08;

pub fn port_b(primary: PrimaryLights) -> u8 {
    primary.bits()
}

pub fn port_f(pedestrian: PedestrianLights) -> u8 {
    let mut value = 0;
    if pedestrian.contains(PedestrianLights::DONT_WALK) {
        value |= PORT_F_DONT_WALK;
    }
    if pedestrian.contains(PedestrianLights::WALK) {
        value |= PORT_F_WALK;
    }
    value
}

/// Decode a port E read into a sample. Stray high bits are an error, not
/// masked off.
pub fn decode_port_e(value: u8) -> Result<SensorSample, InputError> {
    SensorSample::try_from(value)
}
