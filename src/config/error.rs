//! Configuration errors.

use thiserror::Error;

/// Problems found in a machine configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("You must specify at least one state for the state machine")]
    NoStates,

    #[error("Default state '{state}' is not a declared state")]
    UnknownDefault { state: String },

    #[error("Event '{event}' declares a transition from undeclared state '{state}'")]
    UndeclaredOrigin { event: String, state: String },

    #[error("Event '{event}' declares a transition to undeclared state '{state}'")]
    UndeclaredDestination { event: String, state: String },

    #[error("Configuration could not be parsed: {0}")]
    Parse(String),
}
