//! Error types.

use std::fmt;
use thiserror::Error;

/// Errors raised when a proposed state is rejected.
///
/// Both kinds are permanent for the given input: the caller must supply a
/// different value (or reach a different current state first).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    /// The value is not one of the declared members.
    #[error("{value} is not one of the available choices for {definition}")]
    UnknownState { value: String, definition: String },

    /// The value is a member but cannot be reached from the current state.
    #[error("{} -> {to} is not a valid transition for {definition}", Origin(.from))]
    InvalidTransition {
        from: Option<String>,
        to: String,
        definition: String,
    },
}

impl StateError {
    pub fn is_unknown_state(&self) -> bool {
        matches!(self, Self::UnknownState { .. })
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Name of the definition that rejected the value.
    pub fn definition(&self) -> &str {
        match self {
            Self::UnknownState { definition, .. } | Self::InvalidTransition { definition, .. } => {
                definition
            }
        }
    }
}

struct Origin<'a>(&'a Option<String>);

impl fmt::Display for Origin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => f.write_str(value),
            None => f.write_str("None"),
        }
    }
}

/// A single broken invariant of a state definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionViolation {
    #[error("no members declared")]
    NoMembers,

    #[error("duplicate member value '{value}'")]
    DuplicateValue { value: String },

    #[error("duplicate member name '{name}'")]
    DuplicateName { name: String },

    #[error("transition target '{state}' is not a member")]
    UnknownTarget { state: String },

    #[error("origin '{state}' allowed into '{to}' is not a member")]
    UnknownOrigin { state: String, to: String },

    #[error("default '{state}' is not a member")]
    UnknownDefault { state: String },
}

/// Every invariant a definition broke, reported together.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid state definition {name}: {}", join(.violations))]
pub struct DefinitionError {
    pub name: String,
    pub violations: Vec<DefinitionViolation>,
}

fn join(violations: &[DefinitionViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while loading a declarative definition document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported definition version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error(transparent)]
    UnknownState(#[from] StateError),

    #[error(transparent)]
    InvalidDefinition(#[from] DefinitionError),
}
