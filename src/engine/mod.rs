//! The engine: configuration plus the collaborators it acts through.
//!
//! This module is the imperative shell around [`crate::core`]:
//!
//! - **Store**: where a subject's current state lives ([`StateStore`])
//! - **Notifier**: how denials and redirects reach the hosting code ([`Notifier`])
//! - **State Machine**: startup validation, guarded transitions and events
//!
//! Nothing here assumes a persistence technology or a request framework.

mod machine;
mod notifier;
mod store;

pub use machine::{StartOutcome, StateMachine, DENIED_MESSAGE};
pub use notifier::{Notification, Notifier, NullNotifier, RecordingNotifier};
pub use store::{
    current_state_key, destination_state_key, MemoryStore, StateStore, CURRENT_STATE_SUFFIX,
    DESTINATION_STATE_SUFFIX,
};
