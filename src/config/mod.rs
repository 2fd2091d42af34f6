//! Machine configuration.
//!
//! A [`MachineConfig`] enumerates exactly the options the engine recognizes:
//!
//! | key           | meaning                                             | default          |
//! |---------------|-----------------------------------------------------|------------------|
//! | `states`      | state id to the action(s) it owns                   | empty            |
//! | `transitions` | event id to `{origin: destination}`                 | empty            |
//! | `default`     | state a fresh subject starts in                     | first state      |
//! | `namespace`   | store key prefix isolating this machine             | `"StateMachine"` |
//! | `auto`        | redirect to the destination after a fired event     | `false`          |
//!
//! Unknown keys are rejected when parsing. Building a configuration never
//! validates it; call [`MachineConfig::validate`] to collect every problem at
//! once.
//!
//! # Example
//!
//! ```rust
//! use yantra::config::MachineConfig;
//!
//! let config = MachineConfig::from_json(r#"{
//!     "states": {"draft": "edit", "review": "approve"},
//!     "transitions": {"submit": {"draft": "review"}}
//! }"#).unwrap();
//!
//! assert_eq!(config.namespace, "StateMachine");
//! assert!(!config.auto_redirect);
//! assert!(config.validate().is_success());
//! ```

mod builder;
mod error;

pub use builder::ConfigBuilder;
pub use error::ConfigError;

use crate::core::{StateDeclarations, TransitionDeclarations};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "StateMachine";

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Declarative description of one state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    /// Declared states, in declaration order.
    #[serde(default)]
    pub states: StateDeclarations,

    /// Declared transitions grouped by event.
    #[serde(default)]
    pub transitions: TransitionDeclarations,

    /// Explicit default state; the first declared state when unset.
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_state: Option<String>,

    /// Store key prefix.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Redirect to the destination's action after a successful event.
    #[serde(default, rename = "auto")]
    pub auto_redirect: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            states: StateDeclarations::new(),
            transitions: TransitionDeclarations::new(),
            default_state: None,
            namespace: default_namespace(),
            auto_redirect: false,
        }
    }
}

impl MachineConfig {
    /// Start a [`ConfigBuilder`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Parse a configuration from JSON, rejecting unrecognized keys.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check the configuration, accumulating ALL problems found.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        if self.states.is_empty() {
            checks.push(Validation::fail(ConfigError::NoStates));
        } else {
            if let Some(state) = &self.default_state {
                if !self.states.contains_key(state) {
                    checks.push(Validation::fail(ConfigError::UnknownDefault {
                        state: state.clone(),
                    }));
                }
            }

            for (event, edges) in &self.transitions {
                for (origin, destination) in edges {
                    if !self.states.contains_key(origin) {
                        checks.push(Validation::fail(ConfigError::UndeclaredOrigin {
                            event: event.clone(),
                            state: origin.clone(),
                        }));
                    }
                    if !self.states.contains_key(destination) {
                        checks.push(Validation::fail(ConfigError::UndeclaredDestination {
                            event: event.clone(),
                            state: destination.clone(),
                        }));
                    }
                }
            }
        }

        if checks.is_empty() {
            return Validation::success(());
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Same as [`validate`](Self::validate), flattened into a list.
    pub fn problems(&self) -> Vec<ConfigError> {
        match self.validate() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }
}
