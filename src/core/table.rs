//! Transition table derived from event declarations.
//!
//! Transitions are declared grouped by event (`event -> {origin: destination}`).
//! The table flattens them into an adjacency structure so that reachability
//! checks no longer depend on which event declared an edge.

use indexmap::IndexMap;

/// Event declarations: event name to `origin -> destination` pairs.
pub type TransitionDeclarations = IndexMap<String, IndexMap<String, String>>;

/// Queryable view of declared transitions.
///
/// Built fresh from the declarations whenever it is needed; it holds no state
/// of its own beyond what the declarations imply.
///
/// # Example
///
/// ```rust
/// use indexmap::IndexMap;
/// use yantra::core::TransitionTable;
///
/// let mut submit = IndexMap::new();
/// submit.insert("draft".to_string(), "review".to_string());
/// let mut declarations = IndexMap::new();
/// declarations.insert("submit".to_string(), submit);
///
/// let table = TransitionTable::build(&declarations);
/// assert!(table.can_reach("draft", "review"));
/// assert!(!table.can_reach("review", "draft"));
/// assert_eq!(table.events(), vec!["submit"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionTable {
    reachability: IndexMap<String, Vec<String>>,
    events: Vec<String>,
}

impl TransitionTable {
    /// Flatten event declarations into origin -> destinations.
    ///
    /// Events are visited in declaration order, then origins within each
    /// event. A destination reachable through several events is listed once
    /// per event.
    pub fn build(declarations: &TransitionDeclarations) -> Self {
        let mut reachability: IndexMap<String, Vec<String>> = IndexMap::new();

        for edges in declarations.values() {
            for (origin, destination) in edges {
                reachability
                    .entry(origin.clone())
                    .or_default()
                    .push(destination.clone());
            }
        }

        Self {
            reachability,
            events: declarations.keys().cloned().collect(),
        }
    }

    /// Destinations reachable from `origin`, empty when it has no outgoing edges.
    pub fn reachable(&self, origin: &str) -> &[String] {
        self.reachability
            .get(origin)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check whether any event declares an edge `origin -> destination`.
    pub fn can_reach(&self, origin: &str, destination: &str) -> bool {
        self.reachable(origin).iter().any(|d| d == destination)
    }

    /// Declared event names in declaration order.
    pub fn events(&self) -> Vec<&str> {
        self.events.iter().map(String::as_str).collect()
    }

    /// Origins with at least one outgoing edge.
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.reachability.keys().map(String::as_str)
    }

    /// Whether no transitions are declared.
    pub fn is_empty(&self) -> bool {
        self.reachability.is_empty()
    }
}
