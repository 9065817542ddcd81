//! Imperative shell around the FSM.
//!
//! The driver owns the hardware and the clock. Each cycle it writes the
//! current state's outputs, blocks for the state's dwell time, samples the
//! sensors and steps the FSM. The blocking wait is what enforces dwell
//! times, so `cycle` never steps more than once per hold period.
//!
//! Out-of-range samples never reach the table. They are handled by the
//! configured [`InvalidInputPolicy`]: the state is held, and optionally the
//! vehicle signals are forced red until a valid sample arrives.

mod clock;
mod error;
mod io;
pub mod port;

pub use clock::{Clock, SimulatedClock, SleepClock};
pub use error::DriverError;
pub use io::{HardwareIo, ScriptError, ScriptedIo};

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::config::{DriverConfig, InvalidInputPolicy};
use crate::core::{InputError, SensorSample, StateHistory, StateId, StepRecord};
use crate::fsm::{Controller, FsmError, Outputs, TrafficLightFsm};
use chrono::Utc;

/// What happened during one driver cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A valid sample was read and the FSM stepped
    Stepped {
        from: StateId,
        to: StateId,
        sample: SensorSample,
    },

    /// The sample was out of range; the state was held
    Rejected { raw: u8 },
}

/// Runs a controller against real or simulated hardware.
pub struct Driver<H: HardwareIo, C: Clock> {
    fsm: TrafficLightFsm,
    controller: Controller,
    io: H,
    clock: C,
    config: DriverConfig,
    history: Option<StateHistory>,
    steps: u64,
    consecutive_invalid: u32,
    fail_safe: bool,
}

impl<H: HardwareIo, C: Clock> Driver<H, C> {
    /// Create a driver positioned at the FSM's start state.
    pub fn new(fsm: TrafficLightFsm, io: H, clock: C, config: DriverConfig) -> Self {
        let history = config.record_history.then(|| match config.history_capacity {
            Some(capacity) => StateHistory::bounded(capacity),
            None => StateHistory::new(),
        });

        Self {
            controller: fsm.initialize(),
            fsm,
            io,
            clock,
            config,
            history,
            steps: 0,
            consecutive_invalid: 0,
            fail_safe: false,
        }
    }

    /// Resume a driver from a checkpoint.
    ///
    /// When history recording is enabled, the checkpoint's records are
    /// replayed into the configured history, so `history_capacity` still
    /// bounds it.
    pub fn from_checkpoint(
        checkpoint: &Checkpoint,
        io: H,
        clock: C,
        config: DriverConfig,
    ) -> Result<Self, CheckpointError> {
        let (fsm, controller) = checkpoint.restore()?;
        let mut driver = Self::new(fsm, io, clock, config);
        driver.controller = controller;
        driver.steps = checkpoint.steps;
        if let (Some(history), Some(saved)) = (driver.history.as_mut(), &checkpoint.history) {
            for record in saved.transitions() {
                history.push(record.clone());
            }
        }
        Ok(driver)
    }

    pub fn fsm(&self) -> &TrafficLightFsm {
        &self.fsm
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }

    pub fn io(&self) -> &H {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut H {
        &mut self.io
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of successful steps taken.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// True while the driver is forcing all-red after a bad sample.
    pub fn is_fail_safe(&self) -> bool {
        self.fail_safe
    }

    /// Outputs the next cycle will drive.
    pub fn pending_outputs(&self) -> Result<Outputs, FsmError> {
        let outputs = self.fsm.current_outputs(&self.controller)?;
        if self.fail_safe {
            Ok(Outputs::fail_safe(outputs.hold_ticks))
        } else {
            Ok(outputs)
        }
    }

    /// Run one write, wait, sample, step cycle.
    pub fn cycle(&mut self) -> Result<CycleOutcome, DriverError<H::Error>> {
        let outputs = self.pending_outputs()?;
        self.io
            .write_outputs(outputs.primary, outputs.pedestrian)
            .map_err(DriverError::Io)?;
        self.clock.wait_ticks(outputs.hold_ticks);

        let raw = self.io.read_input_sample().map_err(DriverError::Io)?;
        match port::decode_port_e(raw) {
            Ok(sample) => Ok(self.step(sample)?),
            Err(err) => self.reject(raw, err),
        }
    }

    /// Run `cycles` cycles, stopping at the first error.
    pub fn run(&mut self, cycles: usize) -> Result<Vec<CycleOutcome>, DriverError<H::Error>> {
        let start = self.fsm.state_name(&self.controller)?;
        log::info!("driving {} cycles from {}", cycles, start);
        (0..cycles).map(|_| self.cycle()).collect()
    }

    /// Snapshot of the running controller.
    pub fn checkpoint(&self) -> Result<Checkpoint, CheckpointError> {
        let checkpoint = Checkpoint::capture(&self.fsm, &self.controller, self.history.clone())?;
        Ok(checkpoint.with_steps(self.steps))
    }

    fn step(&mut self, sample: SensorSample) -> Result<CycleOutcome, FsmError> {
        let from = self.controller.current();
        self.controller = self.fsm.advance(self.controller, sample)?;
        let to = self.controller.current();

        self.steps += 1;
        self.consecutive_invalid = 0;
        if self.fail_safe {
            log::info!("valid sample {} received, leaving fail-safe", sample);
            self.fail_safe = false;
        }

        if let Some(history) = self.history.as_mut() {
            history.push(StepRecord {
                from,
                to,
                sample,
                step: self.steps,
                timestamp: Utc::now(),
            });
        }

        Ok(CycleOutcome::Stepped { from, to, sample })
    }

    fn reject(&mut self, raw: u8, err: InputError) -> Result<CycleOutcome, DriverError<H::Error>> {
        self.consecutive_invalid = self.consecutive_invalid.saturating_add(1);
        let held = self.fsm.state_name(&self.controller)?;
        log::warn!("{}; holding {} ({} consecutive)", err, held, self.consecutive_invalid);

        if let Some(max) = self.config.max_consecutive_invalid {
            if self.consecutive_invalid >= max {
                return Err(DriverError::TooManyInvalidInputs {
                    count: self.consecutive_invalid,
                });
            }
        }

        if self.config.invalid_input == InvalidInputPolicy::AllRed {
            self.fail_safe = true;
        }

        Ok(CycleOutcome::Rejected { raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PedestrianLights, PrimaryLights, State};
    use crate::table::Intersection;

    fn driver(inputs: &[u8], config: DriverConfig) -> Driver<ScriptedIo, SimulatedClock> {
        Driver::new(
            TrafficLightFsm::standard(),
            ScriptedIo::new(inputs.iter().copied()),
            SimulatedClock::new(),
            config,
        )
    }

    #[test]
    fn cycle_writes_waits_then_steps() {
        let mut driver = driver(&[2], DriverConfig::default());

        let outcome = driver.cycle().unwrap();

        assert_eq!(
            outcome,
            CycleOutcome::Stepped {
                from: Intersection::GoW.id(),
                to: Intersection::WaitW.id(),
                sample: SensorSample::try_from(2u8).unwrap(),
            }
        );
        assert_eq!(driver.io().port_writes(), vec![(0x0C, 0x02)]);
        assert_eq!(driver.clock().waits(), &[100]);
        assert_eq!(driver.steps(), 1);
    }

    #[test]
    fn hold_state_policy_keeps_outputs() {
        let mut driver = driver(&[9, 2], DriverConfig::default());

        assert_eq!(driver.cycle().unwrap(), CycleOutcome::Rejected { raw: 9 });
        assert_eq!(driver.controller().current(), Intersection::GoW.id());
        assert!(!driver.is_fail_safe());

        driver.cycle().unwrap();
        assert_eq!(driver.io().port_writes(), vec![(0x0C, 0x02), (0x0C, 0x02)]);
        assert_eq!(driver.controller().current(), Intersection::WaitW.id());
    }

    #[test]
    fn all_red_policy_fails_safe_until_valid_sample() {
        let config = DriverConfig {
            invalid_input: InvalidInputPolicy::AllRed,
            ..DriverConfig::default()
        };
        let mut driver = driver(&[8, 0xFF, 0, 0], config);

        driver.run(2).unwrap();
        assert!(driver.is_fail_safe());

        driver.cycle().unwrap();
        assert!(!driver.is_fail_safe());
        driver.cycle().unwrap();

        let writes = driver.io().writes();
        assert_eq!(
            writes[0],
            (
                PrimaryLights::WEST_GREEN | PrimaryLights::SOUTH_RED,
                PedestrianLights::DONT_WALK
            )
        );
        assert_eq!(writes[1], (PrimaryLights::ALL_RED, PedestrianLights::DONT_WALK));
        assert_eq!(writes[2], (PrimaryLights::ALL_RED, PedestrianLights::DONT_WALK));
        assert_eq!(writes[3].0, PrimaryLights::WEST_GREEN | PrimaryLights::SOUTH_RED);
        assert_eq!(driver.clock().waits(), &[100, 100, 100, 100]);
    }

    #[test]
    fn too_many_invalid_inputs_aborts() {
        let config = DriverConfig {
            max_consecutive_invalid: Some(2),
            ..DriverConfig::default()
        };
        let mut driver = driver(&[8, 1, 8, 8], config);

        let err = driver.run(4).unwrap_err();
        assert!(matches!(err, DriverError::TooManyInvalidInputs { count: 2 }));
        assert_eq!(driver.io().reads(), 4);
    }

    #[test]
    fn exhausted_script_surfaces_io_error() {
        let mut driver = driver(&[], DriverConfig::default());
        let err = driver.cycle().unwrap_err();
        assert!(matches!(
            err,
            DriverError::Io(ScriptError::Exhausted { reads: 0 })
        ));
    }

    #[test]
    fn history_records_steps() {
        let config = DriverConfig {
            record_history: true,
            history_capacity: Some(3),
            ..DriverConfig::default()
        };
        let mut driver = driver(&[2, 0, 1, 8, 0], config);
        driver.run(5).unwrap();

        let history = driver.history().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history.evicted(), 1);
        let steps: Vec<u64> = history.transitions().map(|r| r.step).collect();
        assert_eq!(steps, vec![2, 3, 4]);
    }

    #[test]
    fn history_is_off_by_default() {
        let mut driver = driver(&[0], DriverConfig::default());
        driver.cycle().unwrap();
        assert!(driver.history().is_none());
    }

    #[test]
    fn invalid_sample_counter_saturates() {
        let mut driver = driver(&[8], DriverConfig::default());
        driver.consecutive_invalid = u32::MAX;

        assert_eq!(driver.cycle().unwrap(), CycleOutcome::Rejected { raw: 8 });
        assert_eq!(driver.consecutive_invalid, u32::MAX);
    }

    #[test]
    fn pending_outputs_follow_fail_safe() {
        let config = DriverConfig {
            invalid_input: InvalidInputPolicy::AllRed,
            ..DriverConfig::default()
        };
        let mut driver = driver(&[0x0D], config);
        driver.cycle().unwrap();

        assert_eq!(driver.pending_outputs(), Ok(Outputs::fail_safe(100)));
    }
}
