//! Yantra: a table-driven finite state machine engine
//!
//! Yantra tracks a single subject's current state, validates and performs
//! transitions between declared states, and resolves which state an external
//! action belongs to. The logic is kept apart from where the current state is
//! stored and from how callers are notified or redirected.
//!
//! # Core Concepts
//!
//! - **State**: a named phase of a workflow, owning one or more action identifiers
//! - **Event**: a named trigger declared as `{origin: destination}` pairs
//! - **Transition**: an edge derived from event declarations, checked
//!   independently of the event that declared it
//! - **Store**: key-value storage for the current state, isolated by namespace
//!
//! # Example
//!
//! ```rust
//! use yantra::config::MachineConfig;
//! use yantra::engine::{MemoryStore, RecordingNotifier, StartOutcome, StateMachine};
//!
//! let config = MachineConfig::builder()
//!     .state("draft", "edit")
//!     .state("review", "approve")
//!     .transition("submit", "draft", "review")
//!     .build();
//!
//! let store = MemoryStore::new().with_entry("StateMachine.current_state", "review");
//! let mut machine = StateMachine::new(config, store, RecordingNotifier::new());
//!
//! // "edit" belongs to "draft", which cannot be reached from "review".
//! let outcome = machine.start(Some("edit")).unwrap();
//! assert_eq!(
//!     outcome,
//!     StartOutcome::Redirected {
//!         state: "review".to_string(),
//!         action: Some("approve".to_string()),
//!     }
//! );
//! assert_eq!(machine.notifier().redirects(), vec!["approve"]);
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::checkpoint::{Checkpoint, CheckpointError};
pub use crate::config::{ConfigBuilder, ConfigError, MachineConfig};
pub use crate::core::{ActionOwner, StateDirectory, TransitionTable};
pub use crate::engine::{Notifier, StartOutcome, StateMachine, StateStore};
