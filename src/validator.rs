//! Stateless transition validation.
//!
//! The validator holds no state of its own: the state machine is entirely
//! declarative, embodied in a [`StateDefinition`]. The same inputs always
//! yield the same verdict.

use crate::core::State;
use crate::definition::StateDefinition;
use crate::error::StateError;
use tracing::{debug, trace};

/// Validate a proposed change from `from` to `to`.
///
/// An absent `to` is always accepted; requiring a value is a separate
/// concern. An absent `from` means "never set before".
///
/// # Example
///
/// ```rust
/// use statefield::core::StateEnum;
/// use statefield::{state_enum, validate};
///
/// state_enum! {
///     enum Job {
///         Queued = ("queued", "Queued"),
///         Running = ("running", "Running"),
///         Done = ("done", "Done"),
///     }
///     transitions: {
///         Done: [Running],
///     }
/// }
///
/// let jobs = Job::definition();
/// assert!(validate(jobs, Some(&Job::Running), Some(&Job::Done)).is_ok());
/// assert!(validate(jobs, Some(&Job::Queued), Some(&Job::Done))
///     .unwrap_err()
///     .is_invalid_transition());
/// assert!(validate(jobs, Some(&Job::Done), None).is_ok());
/// ```
pub fn validate<S: State>(
    definition: &StateDefinition<S>,
    from: Option<&S>,
    to: Option<&S>,
) -> Result<(), StateError> {
    let Some(to) = to else {
        return Ok(());
    };

    if !definition.is_member(to) {
        debug!(
            definition = definition.name(),
            value = to.value(),
            "rejected unknown state"
        );
        return Err(StateError::UnknownState {
            value: to.value().to_string(),
            definition: definition.name().to_string(),
        });
    }

    check_transition(definition, from, to)
}

/// Validate a proposed change whose target is still a raw value.
///
/// The raw value is coerced by value or member name; the typed state is
/// returned on success.
pub fn validate_raw<S: State>(
    definition: &StateDefinition<S>,
    from: Option<&S>,
    to: Option<&str>,
) -> Result<Option<S>, StateError> {
    let Some(raw) = to else {
        return Ok(None);
    };

    let to = definition.coerce(raw).map_err(|err| {
        debug!(definition = definition.name(), value = raw, "rejected unknown state");
        err
    })?;

    check_transition(definition, from, &to)?;
    Ok(Some(to))
}

fn check_transition<S: State>(
    definition: &StateDefinition<S>,
    from: Option<&S>,
    to: &S,
) -> Result<(), StateError> {
    if !definition.is_valid_origin(from, to) {
        debug!(
            definition = definition.name(),
            from = from.map(State::value),
            to = to.value(),
            "rejected state transition"
        );
        return Err(StateError::InvalidTransition {
            from: from.map(|state| state.value().to_string()),
            to: to.value().to_string(),
            definition: definition.name().to_string(),
        });
    }

    trace!(
        definition = definition.name(),
        from = from.map(State::value),
        to = to.value(),
        "accepted state transition"
    );
    Ok(())
}

/// A validator bound to one definition.
///
/// Cheap to copy; useful for hosts that carry the validator around rather
/// than the definition.
#[derive(Debug)]
pub struct TransitionValidator<'d, S: State> {
    definition: &'d StateDefinition<S>,
}

impl<S: State> Clone for TransitionValidator<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: State> Copy for TransitionValidator<'_, S> {}

impl<'d, S: State> TransitionValidator<'d, S> {
    pub fn new(definition: &'d StateDefinition<S>) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &'d StateDefinition<S> {
        self.definition
    }

    /// See [`validate`].
    pub fn validate(&self, from: Option<&S>, to: Option<&S>) -> Result<(), StateError> {
        validate(self.definition, from, to)
    }

    /// See [`validate_raw`].
    pub fn validate_raw(&self, from: Option<&S>, to: Option<&str>) -> Result<Option<S>, StateError> {
        validate_raw(self.definition, from, to)
    }
}
