//! Builder for constructing state definitions.

use crate::core::{State, StateEnum};
use crate::definition::rules::{check_definition, DefinitionParts};
use crate::definition::StateDefinition;
use crate::error::DefinitionError;
use std::collections::HashMap;
use stillwater::validation::Validation;

/// Builder for constructing a [`StateDefinition`] with a fluent API.
///
/// Nothing is checked until [`build`](Self::build), which reports every
/// broken invariant at once.
pub struct DefinitionBuilder<S: State> {
    name: String,
    members: Vec<S>,
    transitions: Vec<(S, Vec<S>)>,
    default: Option<S>,
}

impl<S: State> DefinitionBuilder<S> {
    /// Create a new builder for a definition called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            transitions: Vec::new(),
            default: None,
        }
    }

    /// Declare one member.
    pub fn member(mut self, state: S) -> Self {
        self.members.push(state);
        self
    }

    /// Declare several members, in order.
    pub fn members(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.members.extend(states);
        self
    }

    /// Allow `to` to be reached from each of `origins`.
    ///
    /// Repeated calls for the same target extend its allow-list. An empty
    /// `origins` still declares the entry: `to` then becomes reachable from
    /// no state other than itself.
    pub fn allow(mut self, to: S, origins: impl IntoIterator<Item = S>) -> Self {
        let origins: Vec<S> = origins.into_iter().collect();
        match self.transitions.iter_mut().find(|(target, _)| *target == to) {
            Some((_, existing)) => existing.extend(origins),
            None => self.transitions.push((to, origins)),
        }
        self
    }

    /// Set the state applied when no explicit value is supplied.
    pub fn default_value(mut self, state: S) -> Self {
        self.default = Some(state);
        self
    }

    /// Build the definition.
    /// Returns an error listing every violated invariant.
    pub fn build(self) -> Result<StateDefinition<S>, DefinitionError> {
        let parts = DefinitionParts {
            members: &self.members,
            transitions: &self.transitions,
            default: self.default.as_ref(),
        };

        if let Validation::Failure(errors) = check_definition(&parts) {
            return Err(DefinitionError {
                name: self.name,
                violations: errors.iter().cloned().collect(),
            });
        }

        let mut transitions: HashMap<S, Vec<S>> = HashMap::with_capacity(self.transitions.len());
        for (to, origins) in self.transitions {
            let mut unique: Vec<S> = Vec::with_capacity(origins.len());
            for origin in origins {
                if !unique.contains(&origin) {
                    unique.push(origin);
                }
            }
            transitions.insert(to, unique);
        }

        Ok(StateDefinition {
            name: self.name,
            members: self.members,
            transitions,
            default: self.default,
        })
    }
}

impl<S: StateEnum> DefinitionBuilder<S> {
    /// Create a builder pre-populated with every member of `S`, named after
    /// the type.
    pub fn of_enum() -> Self {
        Self::new(type_name::<S>()).members(S::members())
    }
}

fn type_name<S>() -> &'static str {
    let full = std::any::type_name::<S>();
    full.rsplit("::").next().unwrap_or(full)
}
