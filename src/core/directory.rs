//! Declared states and the actions they own.

use super::actions::ActionOwner;
use indexmap::IndexMap;

/// Declared states: state identifier to the action(s) it owns.
pub type StateDeclarations = IndexMap<String, ActionOwner>;

/// Read-only lookup over declared states.
///
/// # Example
///
/// ```rust
/// use yantra::core::{ActionOwner, StateDeclarations, StateDirectory};
///
/// let mut states = StateDeclarations::new();
/// states.insert("draft".to_string(), ActionOwner::from("edit"));
/// states.insert("review".to_string(), ActionOwner::from(vec!["approve", "reject"]));
///
/// let directory = StateDirectory::new(&states);
/// assert_eq!(directory.resolve_action("reject"), Some("review"));
/// assert_eq!(directory.resolve_action("publish"), None);
/// assert_eq!(directory.first_state(), Some("draft"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StateDirectory<'a> {
    states: &'a StateDeclarations,
}

impl<'a> StateDirectory<'a> {
    /// Borrow `states` for lookups.
    pub fn new(states: &'a StateDeclarations) -> Self {
        Self { states }
    }

    /// The declared mapping, exactly as configured.
    pub fn states(&self) -> &'a StateDeclarations {
        self.states
    }

    /// Find the declared state owning `action`.
    ///
    /// Returns `None` when no state owns it; this is not an error here.
    pub fn resolve_action(&self, action: &str) -> Option<&'a str> {
        Self::resolve_action_in(action, self.states)
    }

    /// Find the key in `states` whose value owns `action`, searching nested
    /// owners depth-first. States are tried in declaration order.
    pub fn resolve_action_in<'s>(action: &str, states: &'s StateDeclarations) -> Option<&'s str> {
        states
            .iter()
            .find(|(_, owner)| owner.contains(action))
            .map(|(state, _)| state.as_str())
    }

    /// First declared state, used as the default when none is configured.
    pub fn first_state(&self) -> Option<&'a str> {
        self.states.keys().next().map(String::as_str)
    }

    /// The action a caller should be sent to in order to present `state`.
    pub fn default_action(&self, state: &str) -> Option<&'a str> {
        self.states.get(state).and_then(ActionOwner::primary_action)
    }

    /// Whether `state` is a declared key.
    pub fn is_declared(&self, state: &str) -> bool {
        self.states.contains_key(state)
    }

    /// Whether no states are declared.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
