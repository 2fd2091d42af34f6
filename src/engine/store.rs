//! State storage collaborator.
//!
//! The engine never owns the current state; it reads and writes it through a
//! [`StateStore`] keyed by `"<namespace>.current_state"`.

use std::collections::HashMap;

/// Suffix of the key holding a subject's current state.
pub const CURRENT_STATE_SUFFIX: &str = "current_state";

/// Suffix of the key written just before a transition commits.
pub const DESTINATION_STATE_SUFFIX: &str = "destination_state";

/// Store key of the current state under `namespace`.
pub fn current_state_key(namespace: &str) -> String {
    format!("{namespace}.{CURRENT_STATE_SUFFIX}")
}

/// Store key of the pending destination under `namespace`.
pub fn destination_state_key(namespace: &str) -> String {
    format!("{namespace}.{DESTINATION_STATE_SUFFIX}")
}

/// Key-value storage for machine state.
///
/// Implementations decide durability. `write` reports success as a boolean;
/// a failed write leaves the engine's transition unsuccessful.
pub trait StateStore {
    fn exists(&self, key: &str) -> bool;

    fn read(&self, key: &str) -> Option<String>;

    fn write(&mut self, key: &str, value: &str) -> bool;
}

impl<T: StateStore + ?Sized> StateStore for &mut T {
    fn exists(&self, key: &str) -> bool {
        (**self).exists(key)
    }

    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        (**self).write(key, value)
    }
}

/// In-process store, suitable for tests and single-request use.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    /// An empty, writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes all fail.
    pub fn read_only() -> Self {
        Self {
            entries: HashMap::new(),
            read_only: true,
        }
    }

    /// Seed an entry regardless of the read-only flag.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        if self.read_only {
            return false;
        }
        self.entries.insert(key.to_string(), value.to_string());
        true
    }
}
