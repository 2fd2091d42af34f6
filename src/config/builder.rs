//! Builder for constructing machine configurations.

use super::MachineConfig;
use crate::core::ActionOwner;

/// Fluent builder for [`MachineConfig`].
///
/// Building is pure assignment: nothing is checked until
/// [`MachineConfig::validate`] or the engine's startup runs.
///
/// # Example
///
/// ```rust
/// use yantra::config::MachineConfig;
///
/// let config = MachineConfig::builder()
///     .state("signing in", vec!["sign_in", "new_user"])
///     .state("billing", "billing")
///     .transition("sign in", "signing in", "billing")
///     .namespace("Checkout")
///     .auto_redirect(true)
///     .build();
///
/// assert_eq!(config.states.len(), 2);
/// assert!(config.auto_redirect);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: MachineConfig,
}

impl ConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state and the action(s) it owns.
    ///
    /// Declaring the same state twice replaces its actions but keeps its
    /// original position.
    pub fn state(mut self, state: impl Into<String>, actions: impl Into<ActionOwner>) -> Self {
        self.config.states.insert(state.into(), actions.into());
        self
    }

    /// Declare that `event` moves `origin` to `destination`.
    pub fn transition(
        mut self,
        event: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.config
            .transitions
            .entry(event.into())
            .or_default()
            .insert(origin.into(), destination.into());
        self
    }

    /// Set the state a fresh subject starts in.
    pub fn default_state(mut self, state: impl Into<String>) -> Self {
        self.config.default_state = Some(state.into());
        self
    }

    /// Set the store key prefix.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Redirect to the destination state's action after a successful event.
    pub fn auto_redirect(mut self, enabled: bool) -> Self {
        self.config.auto_redirect = enabled;
        self
    }

    /// Finish building. The result is not validated.
    pub fn build(self) -> MachineConfig {
        self.config
    }
}
