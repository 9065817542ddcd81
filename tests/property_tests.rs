//! Property-based tests for the transition table and FSM.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated states, inputs and tables.

use proptest::prelude::*;
use traffic_fsm::core::{
    InputError, PedestrianLights, PrimaryLights, SensorSample, State, StateId, SAMPLE_VALUES,
};
use traffic_fsm::fsm::{FsmError, TrafficLightFsm};
use traffic_fsm::table::{Intersection, StateRow, TableViolation, TransitionTable};

prop_compose! {
    fn arbitrary_state()(index in 0..Intersection::all().len()) -> Intersection {
        Intersection::all()[index]
    }
}

prop_compose! {
    fn arbitrary_row(len: usize)(
        primary in 0u8..64,
        pedestrian in 0u8..4,
        hold_ticks in 0u32..1000,
        next in prop::array::uniform8(0..len),
    ) -> StateRow {
        StateRow {
            name: String::new(),
            primary: PrimaryLights::from_bits_truncate(primary),
            pedestrian: PedestrianLights::from_bits_truncate(pedestrian),
            hold_ticks,
            next: next.map(StateId::new),
        }
    }
}

prop_compose! {
    fn arbitrary_table()(len in 1usize..12)(
        rows in prop::collection::vec(arbitrary_row(len), len),
        start in 0..len,
    ) -> TransitionTable {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| StateRow { name: format!("s{}", i), ..row })
            .collect();
        TransitionTable::new(rows, StateId::new(start)).unwrap()
    }
}

proptest! {
    #[test]
    fn step_is_total_and_deterministic(state in arbitrary_state(), input in 0i32..8) {
        let fsm = TrafficLightFsm::standard();
        let controller = fsm.resume(state.id()).unwrap();

        let first = fsm.step(controller, input).unwrap();
        let second = fsm.step(controller, input).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(fsm.table().contains(first.current()));
    }

    #[test]
    fn out_of_range_inputs_are_rejected(
        state in arbitrary_state(),
        input in prop_oneof![i32::MIN..0, 8..i32::MAX],
    ) {
        let fsm = TrafficLightFsm::standard();
        let controller = fsm.resume(state.id()).unwrap();

        prop_assert_eq!(
            fsm.step(controller, input),
            Err(FsmError::Input(InputError::OutOfRangeInput { value: i64::from(input) }))
        );
    }

    #[test]
    fn outputs_depend_only_on_state(state in arbitrary_state(), input in 0i32..8) {
        let fsm = TrafficLightFsm::standard();
        let controller = fsm.resume(state.id()).unwrap();
        let next = fsm.step(controller, input).unwrap();

        let row = &fsm.table()[next.current()];
        let outputs = fsm.current_outputs(&next).unwrap();
        prop_assert_eq!(outputs.primary, row.primary);
        prop_assert_eq!(outputs.pedestrian, row.pedestrian);
        prop_assert_eq!(outputs.hold_ticks, row.hold_ticks);
    }

    #[test]
    fn controllers_are_rejected_by_other_fsms(
        state in arbitrary_state(),
        table in arbitrary_table(),
        input in 0i32..8,
    ) {
        let standard = TrafficLightFsm::standard();
        let other = TrafficLightFsm::new(table);
        let controller = standard.resume(state.id()).unwrap();

        let foreign = FsmError::ForeignController { state: state.id() };
        prop_assert_eq!(other.current_outputs(&controller), Err(foreign.clone()));
        prop_assert_eq!(other.step(controller, input), Err(foreign.clone()));
        prop_assert_eq!(other.state_name(&controller), Err(foreign));
    }

    #[test]
    fn flash_cycle_always_exits(input in 0i32..8) {
        let fsm = TrafficLightFsm::standard();
        let mut controller = fsm.resume(Intersection::FlashOn1.id()).unwrap();

        for _ in 0..4 {
            controller = fsm.step(controller, input).unwrap();
        }

        let exit: Intersection = fsm.current_as(&controller).unwrap();
        prop_assert!(!exit.is_flashing());
        prop_assert!(matches!(
            exit,
            Intersection::GoPed | Intersection::GoW | Intersection::GoS
        ));
    }

    #[test]
    fn random_walks_stay_in_table(inputs in prop::collection::vec(0i32..8, 0..64)) {
        let fsm = TrafficLightFsm::standard();
        let mut controller = fsm.initialize();

        for input in inputs {
            controller = fsm.step(controller, input).unwrap();
            prop_assert!(Intersection::from_id(controller.current()).is_some());
        }
    }

    #[test]
    fn table_json_roundtrip_preserves_transitions(table in arbitrary_table()) {
        let json = serde_json::to_string(&table).unwrap();
        let rebuilt: TransitionTable = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(&rebuilt, &table);
        for index in 0..table.len() {
            let id = StateId::new(index);
            for sample in SensorSample::all() {
                prop_assert_eq!(rebuilt.next(id, sample), table.next(id, sample));
            }
        }
    }

    #[test]
    fn table_bincode_roundtrip_preserves_transitions(table in arbitrary_table()) {
        let bytes = bincode::serialize(&table).unwrap();
        let rebuilt: TransitionTable = bincode::deserialize(&bytes).unwrap();
        prop_assert_eq!(rebuilt, table);
    }

    #[test]
    fn dangling_entries_are_always_reported(
        table in arbitrary_table(),
        row in any::<prop::sample::Index>(),
        input in 0..SAMPLE_VALUES,
        overshoot in 0usize..100,
    ) {
        let mut rows = table.rows().to_vec();
        let row = row.index(rows.len());
        let target = StateId::new(rows.len() + overshoot);
        rows[row].next[input] = target;

        let err = TransitionTable::new(rows, table.start()).unwrap_err();
        let reported = err.violations().iter().any(|v| matches!(
            v,
            TableViolation::DanglingNext { state, input: i, target: t, .. }
                if *state == StateId::new(row) && usize::from(*i) == input && *t == target
        ));
        prop_assert!(reported);
    }

    #[test]
    fn sample_conversion_agrees_with_range(value in any::<i32>()) {
        let result = SensorSample::try_from(value);
        prop_assert_eq!(result.is_ok(), (0..8).contains(&value));
    }
}
