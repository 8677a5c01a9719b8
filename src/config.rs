//! Declarative definition documents.
//!
//! A [`DefinitionConfig`] describes a transition table in plain strings so it
//! can be kept outside the code (JSON text or a compact binary form) and
//! resolved against a [`StateEnum`] at load time. Every string is resolved
//! through the enum's members by value or by name.
//!
//! ```json
//! {
//!   "version": 1,
//!   "name": "PaymentStatus",
//!   "transitions": {
//!     "completed": ["in_progress", "not_required"],
//!     "failed": ["in_progress"]
//!   },
//!   "default": "not_started"
//! }
//! ```

use crate::core::StateEnum;
use crate::definition::{DefinitionBuilder, StateDefinition};
use crate::error::{ConfigError, StateError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Version identifier for the definition document format
pub const CONFIG_VERSION: u32 = 1;

/// Serializable description of a state definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionConfig {
    /// Document format version
    pub version: u32,

    /// Definition name used in error messages
    pub name: String,

    /// Members to include; all members of the enum when absent
    #[serde(default)]
    pub members: Option<Vec<String>>,

    /// Destination -> allowed origins
    #[serde(default)]
    pub transitions: BTreeMap<String, Vec<String>>,

    /// Default state
    #[serde(default)]
    pub default: Option<String>,
}

impl DefinitionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        config.check_version()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = bincode::deserialize(bytes)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        config.check_version()?;
        Ok(config)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        bincode::serialize(self).map_err(|e| ConfigError::SerializationFailed(e.to_string()))
    }

    fn check_version(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: CONFIG_VERSION,
            });
        }
        Ok(())
    }

    /// Resolve this document against the members of `S`.
    pub fn resolve<S: StateEnum>(&self) -> Result<StateDefinition<S>, ConfigError> {
        self.check_version()?;

        // Strings are resolved against the full enum; the builder then checks
        // them against the selected members.
        let universe = DefinitionBuilder::<S>::new(self.name.clone())
            .members(S::members())
            .build()?;
        let coerce = |raw: &String| -> Result<S, StateError> { universe.coerce(raw) };

        let members = match &self.members {
            Some(members) => members.iter().map(coerce).collect::<Result<Vec<_>, _>>()?,
            None => S::members(),
        };

        let mut builder = DefinitionBuilder::new(self.name.clone()).members(members);
        for (to, origins) in &self.transitions {
            let origins = origins.iter().map(coerce).collect::<Result<Vec<_>, _>>()?;
            builder = builder.allow(coerce(to)?, origins);
        }
        if let Some(default) = &self.default {
            builder = builder.default_value(coerce(default)?);
        }

        let definition = builder.build()?;
        debug!(
            definition = definition.name(),
            members = definition.members().len(),
            restricted = self.transitions.len(),
            "resolved state definition"
        );
        Ok(definition)
    }
}
