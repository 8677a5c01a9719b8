//! Core state types.
//!
//! This module contains the value side of a state field:
//! - Single members via the `State` trait
//! - Closed, statically known sets via the `StateEnum` trait
//!
//! Which transitions between members are legal is described separately by
//! [`StateDefinition`](crate::definition::StateDefinition).

mod state;

pub use state::{State, StateEnum};
