//! Blocking delays between samples.

use crate::config::DriverConfig;
use std::time::Duration;

/// Blocking delay measured in hold ticks.
pub trait Clock {
    /// Block for `ticks` hold ticks.
    fn wait_ticks(&mut self, ticks: u32);
}

/// Clock backed by `std::thread::sleep`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SleepClock {
    tick: Duration,
}

impl SleepClock {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    /// Clock using the configured `tick_ms`.
    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(config.tick())
    }

    /// Length of one tick.
    pub fn tick(&self) -> Duration {
        self.tick
    }
}

impl Clock for SleepClock {
    fn wait_ticks(&mut self, ticks: u32) {
        std::thread::sleep(self.tick.saturating_mul(ticks));
    }
}

/// Clock that only counts the ticks it was asked to wait.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulatedClock {
    elapsed_ticks: u64,
    waits: Vec<u32>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Simulated time for a given tick length.
    pub fn elapsed(&self, tick: Duration) -> Duration {
        tick.saturating_mul(u32::try_from(self.elapsed_ticks).unwrap_or(u32::MAX))
    }

    /// Every wait requested, in order.
    pub fn waits(&self) -> &[u32] {
        &self.waits
    }
}

impl Clock for SimulatedClock {
    fn wait_ticks(&mut self, ticks: u32) {
        self.elapsed_ticks += u64::from(ticks);
        self.waits.push(ticks);
    }
}
