//! The table-driven Moore machine.
//!
//! `TrafficLightFsm` pairs a validated transition table with the pure
//! operations on it. All state lives in `Controller` values threaded
//! through calls, so the FSM performs no I/O and several intersections can
//! be simulated with one table.
//!
//! # Example
//!
//! ```rust
//! use traffic_fsm::core::{PedestrianLights, PrimaryLights};
//! use traffic_fsm::fsm::TrafficLightFsm;
//! use traffic_fsm::table::Intersection;
//!
//! let fsm = TrafficLightFsm::standard();
//! let controller = fsm.initialize();
//!
//! let outputs = fsm.current_outputs(&controller).unwrap();
//! assert_eq!(outputs.primary, PrimaryLights::WEST_GREEN | PrimaryLights::SOUTH_RED);
//! assert_eq!(outputs.pedestrian, PedestrianLights::DONT_WALK);
//!
//! let controller = fsm.step(controller, 0b100).unwrap();
//! assert_eq!(fsm.current_as::<Intersection>(&controller), Some(Intersection::WaitW));
//!
//! assert!(fsm.step(controller, 8).is_err());
//! ```

mod controller;
mod error;

pub use controller::{Controller, Outputs, TICK};
pub use error::FsmError;

use crate::core::{SensorSample, State, StateId};
use crate::table::{StateRow, TransitionTable};
use std::sync::Arc;
use uuid::Uuid;

/// Moore machine over a shared, immutable transition table.
///
/// Cloning is cheap: clones share the table and accept each other's
/// controllers. Two FSMs compare equal when their tables are equal, but a
/// controller is still only accepted by the FSM that created it.
#[derive(Clone, Debug)]
pub struct TrafficLightFsm {
    id: Uuid,
    table: Arc<TransitionTable>,
}

impl TrafficLightFsm {
    pub fn new(table: TransitionTable) -> Self {
        Self {
            id: Uuid::new_v4(),
            table: Arc::new(table),
        }
    }

    /// FSM over the standard intersection table.
    pub fn standard() -> Self {
        Self::new(TransitionTable::standard())
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Controller positioned at the table's start state.
    pub fn initialize(&self) -> Controller {
        Controller::new(self.id, self.table.start())
    }

    /// Controller positioned at `id`, for resuming persisted state.
    ///
    /// Fails if `id` is not a row of this FSM's table.
    pub fn resume(&self, id: StateId) -> Result<Controller, FsmError> {
        if self.table.contains(id) {
            Ok(Controller::new(self.id, id))
        } else {
            Err(FsmError::UnknownState {
                id,
                len: self.table.len(),
            })
        }
    }

    /// Outputs of the controller's current state.
    ///
    /// Fails only with [`FsmError::ForeignController`] when `controller`
    /// was created by another FSM.
    pub fn current_outputs(&self, controller: &Controller) -> Result<Outputs, FsmError> {
        let row = self.row(controller)?;
        Ok(Outputs {
            primary: row.primary,
            pedestrian: row.pedestrian,
            hold_ticks: row.hold_ticks,
        })
    }

    /// Advance on a raw sensor reading.
    ///
    /// Fails with [`InputError::OutOfRangeInput`](crate::core::InputError)
    /// if `input` is not in `0..=7`; the controller is not advanced in
    /// that case.
    pub fn step(&self, controller: Controller, input: i32) -> Result<Controller, FsmError> {
        let sample = SensorSample::try_from(input)?;
        self.advance(controller, sample)
    }

    /// Advance on an already validated sample.
    pub fn advance(
        &self,
        controller: Controller,
        sample: SensorSample,
    ) -> Result<Controller, FsmError> {
        let row = self.row(&controller)?;
        let to = row.next[sample.index()];
        log::debug!("{} --[{}]--> {}", row.name, sample, self.table[to].name);
        Ok(Controller::new(self.id, to))
    }

    /// Name of the controller's current state.
    pub fn state_name(&self, controller: &Controller) -> Result<&str, FsmError> {
        self.row(controller).map(|row| row.name.as_str())
    }

    /// Current state as a named state enum.
    ///
    /// Returns `None` if `controller` belongs to another FSM or if `S` does
    /// not describe this table, that is when `S` has a different number of
    /// states or its names differ from the row names.
    pub fn current_as<S: State>(&self, controller: &Controller) -> Option<S> {
        let row = self.row(controller).ok()?;
        if S::all().len() != self.table.len() {
            return None;
        }
        S::from_id(controller.current()).filter(|state| state.name() == row.name)
    }

    fn row(&self, controller: &Controller) -> Result<&StateRow, FsmError> {
        if controller.fsm() != self.id {
            return Err(FsmError::ForeignController {
                state: controller.current(),
            });
        }
        // Controllers of this FSM only ever hold ids of its table.
        Ok(&self.table[controller.current()])
    }
}

impl PartialEq for TrafficLightFsm {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl Eq for TrafficLightFsm {}

impl Default for TrafficLightFsm {
    fn default() -> Self {
        Self::standard()
    }
}
