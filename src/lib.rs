//! Traffic FSM: a table-driven Moore machine for a signalled intersection
//!
//! The controller is split along a "pure core, imperative shell" line.
//! The core is a validated transition table and a handful of pure
//! functions over it; the shell is a driver that owns GPIO and the clock.
//!
//! # Core Concepts
//!
//! - **Table**: Immutable rows of outputs, dwell time and successors,
//!   validated once at construction
//! - **Controller**: A `Copy` value holding the current state, threaded
//!   through calls instead of living in a global
//! - **Step**: A single array lookup from (state, 3-bit sample) to the next
//!   state, with out-of-range samples rejected before the lookup
//! - **Driver**: Writes outputs, waits out the dwell time, samples sensors
//!   and steps, forever or for a bounded simulation
//!
//! # Example
//!
//! ```rust
//! use traffic_fsm::config::DriverConfig;
//! use traffic_fsm::driver::{Driver, ScriptedIo, SimulatedClock};
//! use traffic_fsm::fsm::TrafficLightFsm;
//! use traffic_fsm::table::Intersection;
//!
//! // A pedestrian presses the button, then nobody shows up for a while.
//! let io = ScriptedIo::new([4, 4, 0, 0, 0, 0, 0]);
//! let mut driver = Driver::new(
//!     TrafficLightFsm::standard(),
//!     io,
//!     SimulatedClock::new(),
//!     DriverConfig::default(),
//! );
//! driver.run(7).unwrap();
//!
//! let fsm = driver.fsm();
//! let state = fsm.current_as::<Intersection>(&driver.controller());
//! assert_eq!(state, Some(Intersection::GoPed));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod driver;
pub mod fsm;
pub mod table;

// Re-export commonly used types
pub use crate::core::{InputError, SensorSample, State, StateId};
pub use fsm::{Controller, Outputs, TrafficLightFsm};
pub use table::{Intersection, TableError, TransitionTable};
