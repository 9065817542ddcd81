//! Checkpoint and resume for running controllers.
//!
//! A checkpoint bundles the transition table with the controller's current
//! state and, optionally, its step history, so a driver can be stopped and
//! resumed elsewhere. Checkpoints encode to JSON for inspection or to
//! bincode for compact storage. Decoding revalidates the table.

use crate::core::{StateHistory, StateId};
use crate::fsm::{Controller, TrafficLightFsm};
use crate::table::TransitionTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a controller and the table it runs on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When the checkpoint was taken
    pub timestamp: DateTime<Utc>,

    /// Table the controller runs on
    pub table: TransitionTable,

    /// Current state of the controller
    pub current: StateId,

    /// Steps taken before the checkpoint
    pub steps: u64,

    /// Step history, if it was being recorded
    pub history: Option<StateHistory>,
}

impl Checkpoint {
    /// Snapshot `controller` running on `fsm`.
    ///
    /// Fails if `controller` was not created by `fsm`.
    pub fn capture(
        fsm: &TrafficLightFsm,
        controller: &Controller,
        history: Option<StateHistory>,
    ) -> Result<Self, CheckpointError> {
        fsm.state_name(controller)?;
        Ok(Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            table: fsm.table().clone(),
            current: controller.current(),
            steps: 0,
            history,
        })
    }

    /// Record how many steps were taken before the snapshot.
    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self).map_err(|e| CheckpointError::SerializationFailed {
            format: "json",
            message: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self =
            serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed {
                format: "json",
                message: e.to_string(),
            })?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed {
            format: "bincode",
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self =
            bincode::deserialize(bytes).map_err(|e| CheckpointError::DeserializationFailed {
                format: "bincode",
                message: e.to_string(),
            })?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Rebuild the FSM and a controller at the saved state.
    pub fn restore(&self) -> Result<(TrafficLightFsm, Controller), CheckpointError> {
        self.check_version()?;
        let fsm = TrafficLightFsm::new(self.table.clone());
        let controller = fsm.resume(self.current)?;
        let name = fsm.state_name(&controller)?;
        log::info!("restored checkpoint {} at {} after {} steps", self.id, name, self.steps);
        Ok((fsm, controller))
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version == CHECKPOINT_VERSION {
            Ok(())
        } else {
            Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            })
        }
    }
}
