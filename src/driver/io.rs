//! Hardware boundary of the driver.

use super::port;
use crate::core::{PedestrianLights, PrimaryLights};
use std::collections::VecDeque;
use thiserror::Error;

/// GPIO access needed by the driver.
///
/// `read_input_sample` returns the raw sensor reading. The driver, not the
/// implementation, decides what to do with out-of-range values.
pub trait HardwareIo {
    type Error: std::error::Error + 'static;

    fn read_input_sample(&mut self) -> Result<u8, Self::Error>;

    fn write_outputs(
        &mut self,
        primary: PrimaryLights,
        pedestrian: PedestrianLights,
    ) -> Result<(), Self::Error>;
}

/// Errors raised by [`ScriptedIo`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("input script exhausted after {reads} reads")]
    Exhausted { reads: usize },
}

/// In-memory hardware fed from a scripted list of raw samples.
///
/// Every output write is recorded for later inspection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedIo {
    inputs: VecDeque<u8>,
    reads: usize,
    writes: Vec<(PrimaryLights, PedestrianLights)>,
}

impl ScriptedIo {
    pub fn new(inputs: impl IntoIterator<Item = u8>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            reads: 0,
            writes: Vec::new(),
        }
    }

    /// Queue more raw samples.
    pub fn extend(&mut self, inputs: impl IntoIterator<Item = u8>) {
        self.inputs.extend(inputs);
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Every write, oldest first.
    pub fn writes(&self) -> &[(PrimaryLights, PedestrianLights)] {
        &self.writes
    }

    /// Every write as (port B, port F) register values.
    pub fn port_writes(&self) -> Vec<(u8, u8)> {
        self.writes
            .iter()
            .map(|(primary, pedestrian)| (port::port_b(*primary), port::port_f(*pedestrian)))
            .collect()
    }
}

impl HardwareIo for ScriptedIo {
    type Error = ScriptError;

    fn read_input_sample(&mut self) -> Result<u8, Self::Error> {
        let sample = self
            .inputs
            .pop_front()
            .ok_or(ScriptError::Exhausted { reads: self.reads })?;
        self.reads += 1;
        Ok(sample)
    }

    fn write_outputs(
        &mut self,
        primary: PrimaryLights,
        pedestrian: PedestrianLights,
    ) -> Result<(), Self::Error> {
        self.writes.push((primary, pedestrian));
        Ok(())
    }
}
