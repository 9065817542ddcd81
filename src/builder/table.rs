//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::core::{PedestrianLights, PrimaryLights, StateId, SAMPLE_VALUES};
use crate::table::{StateRow, TransitionTable};

/// Builder for constructing transition tables with a fluent API.
///
/// # Example
///
/// ```
/// use traffic_fsm::builder::TableBuilder;
/// use traffic_fsm::core::{PedestrianLights, PrimaryLights, State};
/// use traffic_fsm::state_enum;
///
/// state_enum! {
///     enum Blinker {
///         On,
///         Off,
///     }
/// }
///
/// let table = TableBuilder::new()
///     .state(Blinker::On.name(), PrimaryLights::ALL_RED, PedestrianLights::DONT_WALK, 50, [Blinker::Off; 8])
///     .state(Blinker::Off.name(), PrimaryLights::empty(), PedestrianLights::OFF, 50, [Blinker::On; 8])
///     .start(Blinker::On)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TableBuilder {
    rows: Vec<StateRow>,
    start: Option<StateId>,
}

impl TableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a state. Rows receive identifiers in the order they are added.
    pub fn state<S: Into<StateId>>(
        mut self,
        name: impl Into<String>,
        primary: PrimaryLights,
        pedestrian: PedestrianLights,
        hold_ticks: u32,
        next: [S; SAMPLE_VALUES],
    ) -> Self {
        self.rows.push(StateRow {
            name: name.into(),
            primary,
            pedestrian,
            hold_ticks,
            next: next.map(Into::into),
        });
        self
    }

    /// Append a pre-built row.
    pub fn row(mut self, row: StateRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Set the start state (required).
    pub fn start(mut self, state: impl Into<StateId>) -> Self {
        self.start = Some(state.into());
        self
    }

    /// Build and validate the table.
    pub fn build(self) -> Result<TransitionTable, BuildError> {
        let start = self.start.ok_or(BuildError::MissingStart)?;

        if self.rows.is_empty() {
            return Err(BuildError::NoStates);
        }

        Ok(TransitionTable::new(self.rows, start)?)
    }
}
