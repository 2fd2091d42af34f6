//! Core state machine types and logic.
//!
//! This module contains the pure part of the engine:
//! - Action ownership for declared states
//! - The state directory that resolves actions back to states
//! - The transition table derived from event declarations
//!
//! Nothing here touches storage or notifies anyone; the engine in
//! [`crate::engine`] wraps these views with side effects.

mod actions;
mod directory;
mod table;

pub use actions::ActionOwner;
pub use directory::{StateDeclarations, StateDirectory};
pub use table::{TransitionDeclarations, TransitionTable};
