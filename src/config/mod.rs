//! Driver configuration.
//!
//! Configuration is plain serde data, loaded from JSON. Every field has a
//! default, so an empty object yields the reference behaviour: 10 ms ticks
//! and out-of-range samples holding the current state.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the driver does when a sensor sample is out of range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidInputPolicy {
    /// Keep the current state and keep driving its outputs
    #[default]
    HoldState,

    /// Keep the current state but drive all vehicle signals red until a
    /// valid sample arrives
    AllRed,
}

/// Settings for the driver loop.
///
/// # Example
///
/// ```rust
/// use traffic_fsm::config::{DriverConfig, InvalidInputPolicy};
///
/// let config = DriverConfig::from_json_str(r#"{"invalid_input": "all_red"}"#).unwrap();
/// assert_eq!(config.invalid_input, InvalidInputPolicy::AllRed);
/// assert_eq!(config.tick_ms, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Length of one hold tick in milliseconds, read by
    /// [`SleepClock::from_config`](crate::driver::SleepClock::from_config)
    pub tick_ms: u64,

    /// Policy for out-of-range samples
    pub invalid_input: InvalidInputPolicy,

    /// Abort after this many consecutive out-of-range samples
    pub max_consecutive_invalid: Option<u32>,

    /// Record step history
    pub record_history: bool,

    /// Retain at most this many history records
    pub history_capacity: Option<usize>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            invalid_input: InvalidInputPolicy::HoldState,
            max_consecutive_invalid: None,
            record_history: false,
            history_capacity: None,
        }
    }
}

impl DriverConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.max_consecutive_invalid == Some(0) {
            return Err(ConfigError::ZeroInvalidLimit);
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
