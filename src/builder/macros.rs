//! Macros for declaring table states.

/// Declare a fieldless enum and implement `State` for it.
///
/// Variants receive dense identifiers in declaration order, so the enum
/// can address rows of a transition table directly. The macro derives
/// `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`, `Serialize` and
/// `Deserialize`, and implements `From<Enum> for StateId`.
///
/// # Example
///
/// ```
/// use traffic_fsm::core::{State, StateId};
/// use traffic_fsm::state_enum;
///
/// state_enum! {
///     pub enum Beacon {
///         On,
///         Off,
///     }
/// }
///
/// assert_eq!(StateId::from(Beacon::Off), StateId::new(1));
/// assert_eq!(Beacon::On.name(), "On");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn id(&self) -> $crate::core::StateId {
                $crate::core::StateId::new(*self as usize)
            }

            fn from_id(id: $crate::core::StateId) -> Option<Self> {
                <Self as $crate::core::State>::all().get(id.index()).copied()
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant),*]
            }
        }

        impl From<$name> for $crate::core::StateId {
            fn from(state: $name) -> Self {
                $crate::core::State::id(&state)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{State, StateId};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        let state = TestState::Processing;
        assert_eq!(state.name(), "Processing");
        assert_eq!(state.id(), StateId::new(1));
        assert_eq!(StateId::from(TestState::Complete), StateId::new(2));
    }

    #[test]
    fn state_enum_lists_all_variants() {
        assert_eq!(
            TestState::all(),
            &[
                TestState::Initial,
                TestState::Processing,
                TestState::Complete
            ]
        );
    }

    #[test]
    fn state_enum_supports_visibility_and_docs() {
        state_enum! {
            /// Documented enum
            pub enum PublicState {
                /// First
                A,
                B,
            }
        }

        assert_eq!(PublicState::from_id(StateId::new(1)), Some(PublicState::B));
        assert_eq!(PublicState::from_id(StateId::new(2)), None);
    }
}
