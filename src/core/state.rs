//! Core traits for enumerated states.
//!
//! A state is a plain immutable value. What transitions between states are
//! legal is not a property of the value itself; it lives in a separate
//! [`StateDefinition`](crate::definition::StateDefinition).

use crate::definition::StateDefinition;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for a single member of a closed set of states.
///
/// All methods are pure. Identity is the value: two states are equal when
/// their values are equal.
///
/// # Required Traits
///
/// - `Clone`, `Eq`, `Hash`: states are stored in transition tables
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `DeserializeOwned`: states are persisted by the host
/// - `Send` + `Sync` + `'static`: definitions are shared process-wide
///
/// # Example
///
/// ```rust
/// use statefield::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TaskState {
///     Pending,
///     Running,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///         }
///     }
///
///     fn value(&self) -> &str {
///         match self {
///             Self::Pending => "pending",
///             Self::Running => "running",
///         }
///     }
/// }
///
/// assert_eq!(TaskState::Running.value(), "running");
/// assert_eq!(TaskState::Running.label(), "Running");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The member identifier, e.g. `NotStarted`.
    fn name(&self) -> &str;

    /// The raw stored representation, e.g. `not_started`.
    fn value(&self) -> &str;

    /// Human readable label.
    ///
    /// Default implementation returns [`State::name`].
    fn label(&self) -> &str {
        self.name()
    }
}

/// A [`State`] whose closed set of members is known statically.
///
/// Usually implemented through [`state_enum!`](crate::state_enum), which
/// also declares the transition table and the default.
pub trait StateEnum: State + Sized {
    /// All members in declaration order.
    fn members() -> Vec<Self>;

    /// The definition of this enum, built once per process.
    fn definition() -> &'static StateDefinition<Self>;
}
