//! State definitions: the closed member set, its transition table and its
//! default.
//!
//! # Transition table
//!
//! The table is keyed by **destination** and lists the **allowed origins**
//! of that destination, not the other way round:
//!
//! ```text
//! Completed <= [InProgress, NotRequired]
//! Cancelled <= [NotStarted, NotRequired, Failed, Completed]
//! ```
//!
//! A transition `from -> to` is legal when any of these holds:
//! - `from == to` (staying put is always legal)
//! - the table is empty (the enum is not acting as a state machine)
//! - `to` has no entry (only listed destinations are restricted)
//! - `from` is listed in the entry of `to`
//!
//! "Where can I go from here" is derived by scanning members, see
//! [`StateDefinition::reachable_from`].

mod builder;
mod rules;

pub use builder::DefinitionBuilder;

use crate::config::{DefinitionConfig, CONFIG_VERSION};
use crate::core::{State, StateEnum};
use crate::error::StateError;
use std::collections::{BTreeMap, HashMap};

/// An immutable description of a closed set of states and the transitions
/// allowed between them.
///
/// Built once through [`DefinitionBuilder`] and read-only afterwards, so it
/// can be shared across threads without locking.
///
/// # Example
///
/// ```rust
/// use statefield::definition::StateDefinition;
/// use statefield::state_enum;
///
/// state_enum! {
///     pub enum Door {
///         Open = ("open", "Open"),
///         Closed = ("closed", "Closed"),
///         Locked = ("locked", "Locked"),
///     }
/// }
///
/// let doors = StateDefinition::<Door>::of_enum()
///     .allow(Door::Locked, [Door::Closed])
///     .build()
///     .unwrap();
///
/// assert!(doors.is_valid_transition(&Door::Closed, &Door::Locked));
/// assert!(!doors.is_valid_transition(&Door::Open, &Door::Locked));
/// // `Open` has no entry, so it is reachable from anywhere.
/// assert!(doors.is_valid_transition(&Door::Locked, &Door::Open));
/// ```
#[derive(Clone, Debug)]
pub struct StateDefinition<S: State> {
    pub(crate) name: String,
    pub(crate) members: Vec<S>,
    pub(crate) transitions: HashMap<S, Vec<S>>,
    pub(crate) default: Option<S>,
}

impl<S: State> StateDefinition<S> {
    /// Start building a definition called `name`.
    pub fn builder(name: impl Into<String>) -> DefinitionBuilder<S> {
        DefinitionBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All members in declaration order.
    pub fn members(&self) -> &[S] {
        &self.members
    }

    pub fn is_member(&self, state: &S) -> bool {
        self.members.contains(state)
    }

    /// Find the member whose value, or failing that whose name, equals `raw`.
    pub fn lookup(&self, raw: &str) -> Option<&S> {
        self.members
            .iter()
            .find(|member| member.value() == raw)
            .or_else(|| self.members.iter().find(|member| member.name() == raw))
    }

    pub fn is_member_raw(&self, raw: &str) -> bool {
        self.lookup(raw).is_some()
    }

    /// Convert a raw value or member name into its typed state.
    pub fn coerce(&self, raw: &str) -> Result<S, StateError> {
        self.lookup(raw).cloned().ok_or_else(|| StateError::UnknownState {
            value: raw.to_string(),
            definition: self.name.clone(),
        })
    }

    /// Like [`coerce`](Self::coerce), but an absent value passes through.
    pub fn coerce_opt(&self, raw: Option<&str>) -> Result<Option<S>, StateError> {
        raw.map(|raw| self.coerce(raw)).transpose()
    }

    /// Accept an already typed state, provided it belongs to this definition.
    pub fn ensure_member(&self, state: S) -> Result<S, StateError> {
        if self.is_member(&state) {
            Ok(state)
        } else {
            Err(StateError::UnknownState {
                value: state.value().to_string(),
                definition: self.name.clone(),
            })
        }
    }

    /// The state applied when no explicit value is supplied.
    pub fn default_value(&self) -> Option<&S> {
        self.default.as_ref()
    }

    /// Check whether `from -> to` is a legal transition.
    pub fn is_valid_transition(&self, from: &S, to: &S) -> bool {
        from == to
            || self.transitions.is_empty()
            || self
                .transitions
                .get(to)
                .map_or(true, |origins| origins.contains(from))
    }

    /// Check a transition whose origin may be absent.
    ///
    /// An absent origin ("never set") is never listed in an allow-list, so it
    /// may only reach unrestricted destinations.
    pub fn is_valid_origin(&self, from: Option<&S>, to: &S) -> bool {
        match from {
            Some(from) => self.is_valid_transition(from, to),
            None => self.transitions.is_empty() || !self.is_restricted(to),
        }
    }

    /// The declared allow-list of `to`.
    ///
    /// Empty when `to` has no entry, which means "unrestricted". Use
    /// [`is_valid_transition`](Self::is_valid_transition) to test legality.
    pub fn allowed_origins(&self, to: &S) -> &[S] {
        self.transitions.get(to).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `to` has an entry in the transition table.
    pub fn is_restricted(&self, to: &S) -> bool {
        self.transitions.contains_key(to)
    }

    /// Every member legally reachable from `from`, in declaration order.
    pub fn reachable_from(&self, from: &S) -> Vec<&S> {
        self.members
            .iter()
            .filter(|to| self.is_valid_transition(from, to))
            .collect()
    }

    /// `(value, label)` pairs in declaration order.
    pub fn choices(&self) -> Vec<(&str, &str)> {
        self.members
            .iter()
            .map(|member| (member.value(), member.label()))
            .collect()
    }

    /// Describe this definition as a declarative document.
    pub fn to_config(&self) -> DefinitionConfig {
        let transitions: BTreeMap<String, Vec<String>> = self
            .transitions
            .iter()
            .map(|(to, origins)| {
                (
                    to.value().to_string(),
                    origins.iter().map(|s| s.value().to_string()).collect(),
                )
            })
            .collect();

        DefinitionConfig {
            version: CONFIG_VERSION,
            name: self.name.clone(),
            members: Some(self.members.iter().map(|s| s.value().to_string()).collect()),
            transitions,
            default: self.default.as_ref().map(|s| s.value().to_string()),
        }
    }
}

impl<S: StateEnum> StateDefinition<S> {
    /// Start building a definition over every member of `S`.
    pub fn of_enum() -> DefinitionBuilder<S> {
        DefinitionBuilder::of_enum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Payment {
            NotStarted = ("not_started", "Not Started"),
            InProgress = ("in_progress", "In Progress"),
            Completed = ("completed", "Completed"),
            Failed = ("failed", "Failed"),
            Cancelled = ("cancelled", "Cancelled"),
            NotRequired = ("not_required", "Not Required"),
        }
        transitions: {
            NotStarted: [],
            InProgress: [NotStarted, Failed],
            Failed: [InProgress],
            Completed: [InProgress, NotRequired],
            NotRequired: [InProgress],
            Cancelled: [NotStarted, NotRequired, Failed, Completed],
        }
        default: NotStarted
    }

    state_enum! {
        enum Colour {
            Red = ("red", "Red"),
            Green = ("green", "Green"),
        }
    }

    fn payments() -> &'static StateDefinition<Payment> {
        Payment::definition()
    }

    #[test]
    fn members_keep_declaration_order() {
        assert_eq!(
            payments().members(),
            &[
                Payment::NotStarted,
                Payment::InProgress,
                Payment::Completed,
                Payment::Failed,
                Payment::Cancelled,
                Payment::NotRequired,
            ]
        );
    }

    #[test]
    fn lookup_matches_value_then_name() {
        assert_eq!(payments().lookup("completed"), Some(&Payment::Completed));
        assert_eq!(payments().lookup("Completed"), Some(&Payment::Completed));
        assert_eq!(payments().lookup("COMPLETED"), None);
        assert!(payments().is_member_raw("not_required"));
        assert!(!payments().is_member_raw("invalid"));
    }

    #[test]
    fn coerce_rejects_unknown_value() {
        let err = payments().coerce("invalid").unwrap_err();
        assert_eq!(
            err,
            StateError::UnknownState {
                value: "invalid".to_string(),
                definition: "Payment".to_string(),
            }
        );
    }

    #[test]
    fn coerce_opt_passes_absent_value_through() {
        assert_eq!(payments().coerce_opt(None), Ok(None));
        assert_eq!(
            payments().coerce_opt(Some("failed")),
            Ok(Some(Payment::Failed))
        );
    }

    #[test]
    fn ensure_member_rejects_states_outside_a_subset() {
        let subset = StateDefinition::builder("Settled")
            .members([Payment::Completed, Payment::Cancelled])
            .build()
            .unwrap();

        assert_eq!(subset.ensure_member(Payment::Completed), Ok(Payment::Completed));
        assert!(subset
            .ensure_member(Payment::Failed)
            .unwrap_err()
            .is_unknown_state());
    }

    #[test]
    fn self_transition_is_always_legal() {
        for state in payments().members() {
            assert!(payments().is_valid_transition(state, state));
        }
    }

    #[test]
    fn allow_list_is_keyed_by_destination() {
        assert!(payments().is_valid_transition(&Payment::InProgress, &Payment::Completed));
        assert!(payments().is_valid_transition(&Payment::NotRequired, &Payment::Completed));
        assert!(!payments().is_valid_transition(&Payment::NotStarted, &Payment::Completed));
        assert!(!payments().is_valid_transition(&Payment::Completed, &Payment::NotStarted));
        assert!(!payments().is_valid_transition(&Payment::Completed, &Payment::InProgress));
    }

    #[test]
    fn destination_without_entry_is_unrestricted() {
        let definition = StateDefinition::<Payment>::of_enum()
            .allow(Payment::Completed, [Payment::InProgress])
            .build()
            .unwrap();

        assert!(!definition.is_restricted(&Payment::Failed));
        assert!(definition.allowed_origins(&Payment::Failed).is_empty());
        assert!(definition.is_valid_transition(&Payment::Completed, &Payment::Failed));
        assert!(!definition.is_valid_transition(&Payment::Failed, &Payment::Completed));
    }

    #[test]
    fn empty_table_allows_everything() {
        let colours = Colour::definition();
        assert!(colours.is_valid_transition(&Colour::Red, &Colour::Green));
        assert!(colours.is_valid_transition(&Colour::Green, &Colour::Red));
        assert!(colours.is_valid_origin(None, &Colour::Red));
    }

    #[test]
    fn absent_origin_only_reaches_unrestricted_destinations() {
        let definition = StateDefinition::<Payment>::of_enum()
            .allow(Payment::Completed, [Payment::InProgress])
            .build()
            .unwrap();

        assert!(definition.is_valid_origin(None, &Payment::NotStarted));
        assert!(!definition.is_valid_origin(None, &Payment::Completed));
        assert!(!payments().is_valid_origin(None, &Payment::NotStarted));
    }

    #[test]
    fn reachable_from_derives_forward_view() {
        assert_eq!(
            payments().reachable_from(&Payment::InProgress),
            vec![
                &Payment::InProgress,
                &Payment::Completed,
                &Payment::Failed,
                &Payment::NotRequired,
            ]
        );
        assert_eq!(
            payments().reachable_from(&Payment::Cancelled),
            vec![&Payment::Cancelled]
        );
    }

    #[test]
    fn choices_pair_values_with_labels() {
        let choices = payments().choices();
        assert_eq!(choices[0], ("not_started", "Not Started"));
        assert_eq!(choices[5], ("not_required", "Not Required"));
    }

    #[test]
    fn default_value_is_declared_member() {
        assert_eq!(payments().default_value(), Some(&Payment::NotStarted));
        assert_eq!(Colour::definition().default_value(), None);
    }

    #[test]
    fn definition_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<StateDefinition<Payment>>();
    }
}
