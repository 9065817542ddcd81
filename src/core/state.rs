//! State identity for transition tables.
//!
//! Tables address their rows by dense integer identifiers. The `State`
//! trait lets a closed enum stand in for those identifiers so tables can
//! be written without magic numbers.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Dense identifier of a row in a transition table (`0..N-1`).
///
/// The identifier carries no meaning beyond identity. It serializes as a
/// bare integer so hand-authored tables stay readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(usize);

impl StateId {
    /// Create an identifier for row `index`.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Row index addressed by this identifier.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Trait for closed sets of named states backing a transition table.
///
/// Implementors map each variant to a unique `StateId`, assigned densely
/// in declaration order. Use the [`state_enum!`](crate::state_enum) macro
/// rather than implementing this by hand.
///
/// # Example
///
/// ```rust
/// use traffic_fsm::core::{State, StateId};
/// use traffic_fsm::state_enum;
///
/// state_enum! {
///     pub enum Crossing {
///         Stop,
///         Walk,
///     }
/// }
///
/// assert_eq!(Crossing::Walk.id(), StateId::new(1));
/// assert_eq!(Crossing::from_id(StateId::new(0)), Some(Crossing::Stop));
/// assert_eq!(Crossing::Walk.name(), "Walk");
/// assert_eq!(Crossing::all().len(), 2);
/// ```
pub trait State: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Human-readable name, used for table rows and logging.
    fn name(&self) -> &'static str;

    /// Table row identifier of this state.
    fn id(&self) -> StateId;

    /// Look up the state for a table row, if one exists.
    fn from_id(id: StateId) -> Option<Self>;

    /// Every state, in identifier order.
    fn all() -> &'static [Self];
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum Phase {
            Green,
            Amber,
            Red,
        }
    }

    #[test]
    fn ids_follow_declaration_order() {
        assert_eq!(Phase::Green.id(), StateId::new(0));
        assert_eq!(Phase::Amber.id(), StateId::new(1));
        assert_eq!(Phase::Red.id(), StateId::new(2));
    }

    #[test]
    fn from_id_inverts_id() {
        for phase in Phase::all() {
            assert_eq!(Phase::from_id(phase.id()), Some(*phase));
        }
        assert_eq!(Phase::from_id(StateId::new(3)), None);
    }

    #[test]
    fn names_match_variants() {
        assert_eq!(Phase::Green.name(), "Green");
        assert_eq!(Phase::Red.name(), "Red");
    }

    #[test]
    fn state_id_serializes_as_integer() {
        let json = serde_json::to_string(&StateId::new(4)).unwrap();
        assert_eq!(json, "4");

        let id: StateId = serde_json::from_str("7").unwrap();
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn state_id_displays_with_hash() {
        assert_eq!(StateId::new(8).to_string(), "#8");
    }
}
