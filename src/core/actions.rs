//! Action ownership for declared states.
//!
//! A state owns one or more external action identifiers. The common case is a
//! single action, but a state may list several, or map named sub-states to
//! their own actions at any nesting depth.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The action(s) a declared state owns.
///
/// Deserializes from a plain string, a list, or a nested mapping:
///
/// ```rust
/// use yantra::core::ActionOwner;
///
/// let owner: ActionOwner = serde_json::from_str(r#"["sign_in", "new_user"]"#).unwrap();
/// assert!(owner.contains("new_user"));
/// assert_eq!(owner.primary_action(), Some("sign_in"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOwner {
    /// A single action identifier.
    Leaf(String),

    /// Several actions, the first being the state's primary action.
    List(Vec<ActionOwner>),

    /// Named sub-states, each owning its own actions.
    Nested(IndexMap<String, ActionOwner>),
}

impl ActionOwner {
    /// Check whether `action` appears anywhere under this owner (depth-first).
    pub fn contains(&self, action: &str) -> bool {
        match self {
            Self::Leaf(id) => id == action,
            Self::List(items) => items.iter().any(|item| item.contains(action)),
            Self::Nested(children) => children.values().any(|child| child.contains(action)),
        }
    }

    /// The first action in declaration order.
    ///
    /// This is the action a caller is redirected to when a state must be
    /// presented by a single action. Returns `None` only for empty lists or
    /// mappings.
    pub fn primary_action(&self) -> Option<&str> {
        match self {
            Self::Leaf(id) => Some(id.as_str()),
            Self::List(items) => items.iter().find_map(ActionOwner::primary_action),
            Self::Nested(children) => children.values().find_map(ActionOwner::primary_action),
        }
    }
}

impl From<&str> for ActionOwner {
    fn from(action: &str) -> Self {
        Self::Leaf(action.to_string())
    }
}

impl From<String> for ActionOwner {
    fn from(action: String) -> Self {
        Self::Leaf(action)
    }
}

impl From<Vec<&str>> for ActionOwner {
    fn from(actions: Vec<&str>) -> Self {
        Self::List(actions.into_iter().map(ActionOwner::from).collect())
    }
}
