//! Statefield: declarative transition validation for enumerated state fields
//!
//! A state field holds one member of a closed set of states. Its definition
//! declares, for each destination state, which origin states may move into
//! it. Before a host commits a change it asks the validator whether the
//! change is legal; the answer is either `Ok` or one of two distinguishable
//! errors.
//!
//! # Core Concepts
//!
//! - **State**: a plain value type via the `State` trait
//! - **StateDefinition**: members, the per-destination allow-list and a default
//! - **Validator**: the pure `validate` check between two states
//! - **StateField**: an explicit setter that validates before committing
//!
//! # Example
//!
//! ```rust
//! use statefield::core::StateEnum;
//! use statefield::{state_enum, validate, StateError};
//!
//! state_enum! {
//!     pub enum PaymentStatus {
//!         NotStarted = ("not_started", "Not Started"),
//!         InProgress = ("in_progress", "In Progress"),
//!         Completed = ("completed", "Completed"),
//!         Failed = ("failed", "Failed"),
//!         Cancelled = ("cancelled", "Cancelled"),
//!         NotRequired = ("not_required", "Not Required"),
//!     }
//!     transitions: {
//!         NotStarted: [],
//!         InProgress: [NotStarted, Failed],
//!         Failed: [InProgress],
//!         Completed: [InProgress, NotRequired],
//!         NotRequired: [InProgress],
//!         Cancelled: [NotStarted, NotRequired, Failed, Completed],
//!     }
//!     default: NotStarted
//! }
//!
//! let payments = PaymentStatus::definition();
//!
//! assert!(validate(payments, Some(&PaymentStatus::InProgress), Some(&PaymentStatus::Completed)).is_ok());
//! assert!(matches!(
//!     validate(payments, Some(&PaymentStatus::NotStarted), Some(&PaymentStatus::Completed)),
//!     Err(StateError::InvalidTransition { .. })
//! ));
//! assert!(matches!(
//!     payments.coerce("invalid"),
//!     Err(StateError::UnknownState { .. })
//! ));
//! ```

pub mod config;
pub mod core;
pub mod definition;
pub mod error;
pub mod field;
mod macros;
pub mod validator;

// Re-export commonly used types
pub use config::DefinitionConfig;
pub use crate::core::{State, StateEnum};
pub use definition::{DefinitionBuilder, StateDefinition};
pub use error::{ConfigError, DefinitionError, DefinitionViolation, StateError};
pub use field::StateField;
pub use validator::{validate, validate_raw, TransitionValidator};
