//! Controller values and state outputs.

use crate::core::{PedestrianLights, PrimaryLights, StateId};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Length of one hold tick.
pub const TICK: Duration = Duration::from_millis(10);

/// Position of one intersection in its transition table.
///
/// A controller is a plain value holding the current state. It can only
/// be created by [`TrafficLightFsm`](super::TrafficLightFsm) and is tagged
/// with the identity of the FSM that made it, so it is only accepted by
/// that FSM and its clones. Any number of controllers may share one FSM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Controller {
    current: StateId,
    #[serde(skip_serializing)]
    fsm: Uuid,
}

impl Controller {
    pub(super) fn new(fsm: Uuid, current: StateId) -> Self {
        Self { current, fsm }
    }

    pub(super) fn fsm(&self) -> Uuid {
        self.fsm
    }

    /// Identifier of the current state.
    pub fn current(&self) -> StateId {
        self.current
    }
}

/// Outputs of the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Outputs {
    pub primary: PrimaryLights,
    pub pedestrian: PedestrianLights,
    /// Dwell time in ticks
    pub hold_ticks: u32,
}

impl Outputs {
    /// Dwell time for a given tick length.
    pub fn hold_duration(&self, tick: Duration) -> Duration {
        tick.saturating_mul(self.hold_ticks)
    }

    /// Outputs forced while the driver fails safe: all vehicle signals red,
    /// don't-walk lit.
    pub fn fail_safe(hold_ticks: u32) -> Self {
        Self {
            primary: PrimaryLights::ALL_RED,
            pedestrian: PedestrianLights::DONT_WALK,
            hold_ticks,
        }
    }
}
