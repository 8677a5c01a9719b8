//! A state-valued field with validated assignment.
//!
//! `StateField` is the explicit setter a host calls instead of assigning a
//! state directly: every assignment is coerced and validated against the
//! current value before it is committed.

use crate::core::State;
use crate::definition::StateDefinition;
use crate::error::StateError;
use crate::validator;

/// The current state of one record, bound to its definition.
///
/// # Example
///
/// ```rust
/// use statefield::core::StateEnum;
/// use statefield::{state_enum, StateField};
///
/// state_enum! {
///     enum Order {
///         Open = ("open", "Open"),
///         Paid = ("paid", "Paid"),
///         Shipped = ("shipped", "Shipped"),
///     }
///     transitions: {
///         Paid: [Open],
///         Shipped: [Paid],
///     }
///     default: Open
/// }
///
/// let mut order = StateField::new(Order::definition());
/// assert_eq!(order.get(), Some(&Order::Open));
///
/// assert!(order.set(Order::Shipped).is_err());
/// assert_eq!(order.get(), Some(&Order::Open));
///
/// order.set_raw("paid").unwrap();
/// order.set(Order::Shipped).unwrap();
/// assert_eq!(order.get(), Some(&Order::Shipped));
/// ```
#[derive(Debug, Clone)]
pub struct StateField<'d, S: State> {
    definition: &'d StateDefinition<S>,
    current: Option<S>,
}

impl<'d, S: State> StateField<'d, S> {
    /// Create a field without an explicit value; it holds the default.
    pub fn new(definition: &'d StateDefinition<S>) -> Self {
        Self {
            definition,
            current: definition.default_value().cloned(),
        }
    }

    /// Create a field with an explicit initial value.
    ///
    /// The initial value only has to be a member: a record starting out in
    /// any state is not a transition.
    pub fn with_value(definition: &'d StateDefinition<S>, state: S) -> Result<Self, StateError> {
        let state = definition.ensure_member(state)?;
        Ok(Self {
            definition,
            current: Some(state),
        })
    }

    /// Like [`with_value`](Self::with_value), from a raw value or member name.
    pub fn with_raw(definition: &'d StateDefinition<S>, raw: &str) -> Result<Self, StateError> {
        let state = definition.coerce(raw)?;
        Ok(Self {
            definition,
            current: Some(state),
        })
    }

    pub fn definition(&self) -> &'d StateDefinition<S> {
        self.definition
    }

    pub fn get(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Check whether `proposed` could be assigned, without assigning it.
    pub fn check(&self, proposed: Option<&S>) -> Result<(), StateError> {
        validator::validate(self.definition, self.current.as_ref(), proposed)
    }

    /// Assign `state` if the transition from the current value is legal.
    /// On error the field is left unchanged.
    pub fn set(&mut self, state: S) -> Result<(), StateError> {
        self.check(Some(&state))?;
        self.current = Some(state);
        Ok(())
    }

    /// Assign a raw value or member name.
    pub fn set_raw(&mut self, raw: &str) -> Result<(), StateError> {
        let state = validator::validate_raw(self.definition, self.current.as_ref(), Some(raw))?;
        self.current = state;
        Ok(())
    }

    /// Unset the value. Removing a value is not a transition and is not
    /// validated.
    pub fn clear(&mut self) -> Option<S> {
        self.current.take()
    }

    pub fn into_inner(self) -> Option<S> {
        self.current
    }
}
