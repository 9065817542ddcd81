//! The standard intersection controller.
//!
//! Two approaches (west and south) share the junction with a pedestrian
//! crossing. Outputs, dwell times and successors reproduce the reference
//! controller exactly, including its quirks; see DESIGN.md.

use super::{StateRow, TransitionTable};
use crate::core::{PedestrianLights, PrimaryLights, State, StateId, SAMPLE_VALUES};

crate::state_enum! {
    /// States of the standard intersection table, in row order.
    pub enum Intersection {
        /// West traffic flows
        GoW,
        /// West yellow
        WaitW,
        /// South traffic flows
        GoS,
        /// South yellow
        WaitS,
        /// Pedestrians cross, all vehicle signals red
        GoPed,
        /// Don't-walk lit, first flash
        FlashOn1,
        /// Pedestrian lamps dark
        FlashOff1,
        /// Don't-walk lit, second flash
        FlashOn2,
        /// Pedestrian lamps dark, then back to traffic
        FlashOff2,
    }
}

impl Intersection {
    /// True for the four states of the don't-walk flash sequence.
    pub fn is_flashing(self) -> bool {
        matches!(
            self,
            Self::FlashOn1 | Self::FlashOff1 | Self::FlashOn2 | Self::FlashOff2
        )
    }
}

fn row(
    state: Intersection,
    primary: PrimaryLights,
    pedestrian: PedestrianLights,
    hold_ticks: u32,
    next: [Intersection; SAMPLE_VALUES],
) -> StateRow {
    StateRow {
        name: state.name().to_string(),
        primary,
        pedestrian,
        hold_ticks,
        next: next.map(StateId::from),
    }
}

pub(super) fn table() -> TransitionTable {
    use Intersection::*;

    let dont_walk = PedestrianLights::DONT_WALK;
    let all_red = PrimaryLights::ALL_RED;

    // Rows are listed in `Intersection` order, so every id is in range.
    let rows = vec![
        row(
            GoW,
            PrimaryLights::WEST_GREEN | PrimaryLights::SOUTH_RED,
            dont_walk,
            100,
            [GoW, GoW, WaitW, WaitW, WaitW, WaitW, WaitW, WaitW],
        ),
        row(
            WaitW,
            PrimaryLights::WEST_YELLOW | PrimaryLights::SOUTH_RED,
            dont_walk,
            50,
            [GoS, GoW, GoS, GoS, GoPed, GoPed, GoS, GoS],
        ),
        row(
            GoS,
            PrimaryLights::WEST_RED | PrimaryLights::SOUTH_GREEN,
            dont_walk,
            100,
            [GoS, WaitS, GoS, WaitS, WaitS, WaitS, WaitS, WaitS],
        ),
        row(
            WaitS,
            PrimaryLights::WEST_RED | PrimaryLights::SOUTH_YELLOW,
            dont_walk,
            50,
            [WaitS, WaitS, WaitS, WaitS, GoPed, GoPed, GoPed, GoPed],
        ),
        row(
            GoPed,
            all_red,
            PedestrianLights::WALK,
            100,
            [GoPed, FlashOn1, FlashOn1, FlashOn1, GoPed, FlashOn1, FlashOn1, FlashOn1],
        ),
        row(FlashOn1, all_red, dont_walk, 20, [FlashOff1; SAMPLE_VALUES]),
        row(FlashOff1, all_red, PedestrianLights::OFF, 20, [FlashOn2; SAMPLE_VALUES]),
        row(FlashOn2, all_red, dont_walk, 20, [FlashOff2; SAMPLE_VALUES]),
        row(
            FlashOff2,
            all_red,
            PedestrianLights::OFF,
            20,
            [GoPed, GoW, GoS, GoW, GoPed, GoW, GoS, GoW],
        ),
    ];

    TransitionTable {
        rows,
        start: GoW.id(),
    }
}
