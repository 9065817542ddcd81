//! Core types shared by the transition table, the FSM and its driver.
//!
//! This module contains the pure building blocks of the controller:
//! - State identity via `StateId` and the `State` trait
//! - Validated 3-bit sensor samples
//! - Light output masks for the vehicle and pedestrian signals
//! - Step history tracking
//!
//! Nothing in this module performs I/O.

mod history;
mod lights;
mod sample;
mod state;

pub use history::{StateHistory, StepRecord};
pub use lights::{LightsError, PedestrianLights, PrimaryLights};
pub use sample::{InputError, SensorSample, SAMPLE_VALUES};
pub use state::{State, StateId};
