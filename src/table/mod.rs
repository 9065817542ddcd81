//! Transition tables for Moore machines.
//!
//! A table is a flat array of rows indexed by `StateId`. Each row holds the
//! outputs of its state, how long the state is held, and the successor for
//! every possible sensor sample. Lookup is a pair of array indexings with
//! no branching on the input, so a step takes the same time whichever
//! transition fires.
//!
//! Tables are validated once, at construction, and are immutable
//! afterwards. Validation uses Stillwater's `Validation` to report every
//! violation in a single pass instead of stopping at the first one.

mod error;
mod standard;

pub use error::{TableError, TableViolation};
pub use standard::Intersection;

use crate::core::{PedestrianLights, PrimaryLights, SensorSample, StateId, SAMPLE_VALUES};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::ops::Index;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// One row of a transition table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRow {
    /// Name used in logs and diagnostics
    pub name: String,
    /// Vehicle signal outputs while in this state
    pub primary: PrimaryLights,
    /// Pedestrian signal outputs while in this state
    pub pedestrian: PedestrianLights,
    /// Dwell time before the next sample, in 10 ms ticks
    pub hold_ticks: u32,
    /// Successor state for each sensor sample
    pub next: [StateId; SAMPLE_VALUES],
}

/// Validated, immutable transition table.
///
/// Every `next` entry is guaranteed to reference a row of the table and the
/// start state is guaranteed to exist. Deserialization goes through the
/// same validation as [`TransitionTable::new`].
///
/// # Example
///
/// ```rust
/// use traffic_fsm::core::{PedestrianLights, PrimaryLights, StateId};
/// use traffic_fsm::table::{StateRow, TableViolation, TransitionTable};
///
/// let row = StateRow {
///     name: "blink".to_string(),
///     primary: PrimaryLights::ALL_RED,
///     pedestrian: PedestrianLights::DONT_WALK,
///     hold_ticks: 50,
///     next: [StateId::new(1); 8],
/// };
///
/// let err = TransitionTable::new(vec![row], StateId::new(0)).unwrap_err();
/// assert_eq!(err.violations().len(), 8);
/// assert!(matches!(err.violations()[0], TableViolation::DanglingNext { .. }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct TransitionTable {
    rows: Vec<StateRow>,
    start: StateId,
}

/// Unvalidated wire form of a table.
#[derive(Deserialize)]
struct RawTable {
    rows: Vec<StateRow>,
    start: StateId,
}

impl TryFrom<RawTable> for TransitionTable {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.start)
    }
}

impl TransitionTable {
    /// Build a table, checking every invariant.
    ///
    /// Fails with [`TableError::InvalidTable`] listing all violations if the
    /// table is empty, the start state is out of range, any `next` entry
    /// is dangling, or two rows share a name.
    pub fn new(rows: Vec<StateRow>, start: StateId) -> Result<Self, TableError> {
        match validate(&rows, start) {
            Validation::Success(_) => Ok(Self { rows, start }),
            Validation::Failure(errors) => Err(TableError::InvalidTable {
                violations: errors.iter().cloned().collect(),
            }),
        }
    }

    /// The 9-state intersection controller with a pedestrian crossing.
    pub fn standard() -> Self {
        standard::table()
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[StateRow] {
        &self.rows
    }

    pub fn row(&self, id: StateId) -> Option<&StateRow> {
        self.rows.get(id.index())
    }

    pub fn contains(&self, id: StateId) -> bool {
        id.index() < self.rows.len()
    }

    /// Successor of `id` for `sample`, if `id` is part of the table.
    pub fn next(&self, id: StateId, sample: SensorSample) -> Option<StateId> {
        self.row(id).map(|row| row.next[sample.index()])
    }

    /// Identifier of the state called `name`.
    pub fn find(&self, name: &str) -> Option<StateId> {
        self.rows
            .iter()
            .position(|row| row.name == name)
            .map(StateId::new)
    }

    /// Distinct successors of `id` over all samples.
    pub fn successors(&self, id: StateId) -> BTreeSet<StateId> {
        self.row(id)
            .map(|row| row.next.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every state reachable from `id`, including `id` itself.
    pub fn reachable_from(&self, id: StateId) -> BTreeSet<StateId> {
        let mut seen = BTreeSet::new();
        if !self.contains(id) {
            return seen;
        }

        let mut queue = VecDeque::from([id]);
        seen.insert(id);
        while let Some(current) = queue.pop_front() {
            for next in self.successors(current) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}

impl Index<StateId> for TransitionTable {
    type Output = StateRow;

    fn index(&self, id: StateId) -> &StateRow {
        &self.rows[id.index()]
    }
}

fn validate(rows: &[StateRow], start: StateId) -> Validation<(), NonEmptyVec<TableViolation>> {
    if rows.is_empty() {
        return Validation::fail(TableViolation::EmptyTable);
    }

    let len = rows.len();
    let mut checks: Vec<Validation<(), NonEmptyVec<TableViolation>>> = Vec::new();

    checks.push(if start.index() < len {
        Validation::success(())
    } else {
        Validation::fail(TableViolation::StartOutOfRange { start, len })
    });

    for (index, row) in rows.iter().enumerate() {
        for (input, target) in row.next.iter().enumerate() {
            if target.index() >= len {
                checks.push(Validation::fail(TableViolation::DanglingNext {
                    state: StateId::new(index),
                    name: row.name.clone(),
                    input: input as u8,
                    target: *target,
                    len,
                }));
            }
        }
    }

    let mut names: HashMap<&str, StateId> = HashMap::new();
    for (index, row) in rows.iter().enumerate() {
        let id = StateId::new(index);
        if let Some(first) = names.insert(row.name.as_str(), id) {
            checks.push(Validation::fail(TableViolation::DuplicateName {
                name: row.name.clone(),
                first,
                second: id,
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
