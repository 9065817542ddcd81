//! Intersection Simulation
//!
//! This example drives the standard intersection through a scripted
//! sequence of sensor readings.
//!
//! Key concepts:
//! - Table-driven Moore machine (outputs depend only on state)
//! - Simulated hardware and clock
//! - Fail-safe handling of out-of-range samples
//! - Checkpoint and resume
//!
//! Run with: RUST_LOG=debug cargo run --example intersection

use std::error::Error;
use traffic_fsm::checkpoint::Checkpoint;
use traffic_fsm::config::{DriverConfig, InvalidInputPolicy};
use traffic_fsm::driver::{port, CycleOutcome, Driver, ScriptedIo, SimulatedClock};
use traffic_fsm::fsm::TrafficLightFsm;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Intersection Simulation ===\n");

    // West traffic, a pedestrian, a car from the south, a glitch, then quiet.
    let script = [0, 4, 4, 4, 2, 2, 2, 2, 2, 0xFF, 2, 0, 1, 0];

    let config = DriverConfig {
        invalid_input: InvalidInputPolicy::AllRed,
        record_history: true,
        ..DriverConfig::default()
    };

    let mut driver = Driver::new(
        TrafficLightFsm::standard(),
        ScriptedIo::new(script),
        SimulatedClock::new(),
        config.clone(),
    );

    println!("{:>4}  {:>8}  {:>6}  {:>10}  next", "step", "port B", "port F", "state");
    for cycle in 0..script.len() {
        let state = driver.fsm().state_name(&driver.controller())?.to_string();
        let outputs = driver.pending_outputs()?;

        let next = match driver.cycle()? {
            CycleOutcome::Stepped { sample, .. } => format!(
                "{} on {}",
                driver.fsm().state_name(&driver.controller())?,
                sample
            ),
            CycleOutcome::Rejected { raw } => format!("held, rejected {:#04x}", raw),
        };

        println!(
            "{:>4}  {:#010b}  {:#06b}  {:>10}  {}",
            cycle,
            port::port_b(outputs.primary),
            port::port_f(outputs.pedestrian),
            state,
            next
        );
    }

    println!(
        "\nSimulated time: {:?} over {} steps",
        driver.clock().elapsed(config.tick()),
        driver.steps()
    );

    println!("\n=== Checkpoint ===\n");

    let json = driver.checkpoint()?.to_json()?;
    println!("Checkpoint is {} bytes of JSON", json.len());

    let checkpoint = Checkpoint::from_json(&json)?;
    let mut resumed = Driver::from_checkpoint(
        &checkpoint,
        ScriptedIo::new([4]),
        SimulatedClock::new(),
        config,
    )?;
    println!(
        "Resumed at {} after {} steps",
        resumed.fsm().state_name(&resumed.controller())?,
        resumed.steps()
    );

    resumed.cycle()?;
    println!(
        "Next state: {}",
        resumed.fsm().state_name(&resumed.controller())?
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
