//! State machine that validates and performs transitions against a store.

use crate::config::{ConfigError, MachineConfig};
use crate::core::{StateDeclarations, StateDirectory, TransitionTable};
use crate::engine::notifier::Notifier;
use crate::engine::store::{current_state_key, destination_state_key, StateStore};

/// Message passed to [`Notifier::notify_denied`] when startup rejects the
/// current action.
pub const DENIED_MESSAGE: &str = "You cannot access that page at this point in the process";

/// Result of [`StateMachine::start`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// No current action was supplied; only the current state was initialized.
    Idle { state: String },

    /// The current action belongs to the current state or one reachable from
    /// it. `state` is the current state after any implicit transition.
    Allowed { state: String },

    /// The current action is not accessible. The caller was notified and,
    /// when the current state exposes an action, redirected to it.
    Redirected {
        state: String,
        action: Option<String>,
    },
}

/// Finite state machine for a single subject.
///
/// The machine keeps no state of its own across calls apart from its
/// configuration: the current state lives in the [`StateStore`], and the
/// transition table and state directory are derived from the configuration
/// each time they are consulted.
///
/// # Example
///
/// ```rust
/// use yantra::config::MachineConfig;
/// use yantra::engine::{MemoryStore, RecordingNotifier, StartOutcome, StateMachine};
///
/// let config = MachineConfig::builder()
///     .state("draft", "edit")
///     .state("review", "approve")
///     .transition("submit", "draft", "review")
///     .build();
///
/// let mut machine = StateMachine::new(config, MemoryStore::new(), RecordingNotifier::new());
/// let outcome = machine.start(Some("edit")).unwrap();
/// assert_eq!(outcome, StartOutcome::Allowed { state: "draft".to_string() });
///
/// assert!(machine.fire_event("submit"));
/// assert_eq!(machine.current_state().as_deref(), Some("review"));
/// ```
pub struct StateMachine<St: StateStore, N: Notifier> {
    config: MachineConfig,
    store: St,
    notifier: N,
}

impl<St: StateStore, N: Notifier> StateMachine<St, N> {
    /// Create a machine; the configuration is stored as given.
    pub fn new(config: MachineConfig, store: St, notifier: N) -> Self {
        Self {
            config,
            store,
            notifier,
        }
    }

    /// Replace the configuration. No validation is performed.
    pub fn configure(&mut self, config: MachineConfig) {
        self.config = config;
    }

    /// The active configuration.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Declared states, exactly as configured.
    pub fn states(&self) -> &StateDeclarations {
        self.directory().states()
    }

    /// Lookup view over the declared states.
    pub fn directory(&self) -> StateDirectory<'_> {
        StateDirectory::new(&self.config.states)
    }

    /// Transition table derived from the declared transitions.
    pub fn transitions(&self) -> TransitionTable {
        TransitionTable::build(&self.config.transitions)
    }

    /// Declared event names in declaration order.
    pub fn declared_events(&self) -> Vec<String> {
        self.transitions()
            .events()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// The configured default state, or the first declared state.
    pub fn default_state(&self) -> Option<&str> {
        self.config
            .default_state
            .as_deref()
            .or_else(|| self.directory().first_state())
    }

    /// Current state from the store, falling back to the default state.
    ///
    /// `None` only when nothing is stored and no state is declared.
    pub fn current_state(&self) -> Option<String> {
        self.store
            .read(&current_state_key(&self.config.namespace))
            .or_else(|| self.default_state().map(str::to_string))
    }

    /// Overwrite the current state without any checks.
    ///
    /// Returns whether the store accepted the write.
    pub fn set_current_state(&mut self, state: &str) -> bool {
        self.store.write(&current_state_key(&self.config.namespace), state)
    }

    /// Validate the configuration and the action being performed.
    ///
    /// Derives the default state when none is configured, persists it as the
    /// current state for a fresh subject, then checks that `action` belongs to
    /// the current state or to one directly reachable from it. Reaching
    /// another state this way commits that transition. An action that no
    /// state owns is never accessible.
    ///
    /// Returns [`ConfigError::NoStates`] when nothing is declared; the machine
    /// stays usable for further calls once reconfigured.
    pub fn start(&mut self, action: Option<&str>) -> Result<StartOutcome, ConfigError> {
        if self.config.states.is_empty() {
            let error = ConfigError::NoStates;
            tracing::warn!(namespace = %self.config.namespace, "{error}");
            return Err(error);
        }

        for problem in self.config.problems() {
            tracing::warn!(namespace = %self.config.namespace, "{problem}");
        }

        if self.config.default_state.is_none() {
            self.config.default_state = self.directory().first_state().map(str::to_string);
        }

        let key = current_state_key(&self.config.namespace);
        if !self.store.exists(&key) {
            if let Some(default) = self.default_state().map(str::to_string) {
                if !self.store.write(&key, &default) {
                    tracing::warn!(key = %key, state = %default, "failed to persist initial state");
                }
            }
        }

        let current = self.current_state().unwrap_or_default();

        let Some(action) = action else {
            return Ok(StartOutcome::Idle { state: current });
        };

        let target = self.directory().resolve_action(action).map(str::to_string);
        let allowed = match target.as_deref() {
            Some(target) => self.transition(&current, target),
            None => false,
        };

        if allowed {
            return Ok(StartOutcome::Allowed {
                state: self.current_state().unwrap_or_default(),
            });
        }

        tracing::warn!(
            namespace = %self.config.namespace,
            action,
            state = %current,
            target = ?target,
            "action not accessible from current state"
        );
        self.notifier.notify_denied(DENIED_MESSAGE);

        let directory = self.directory();
        let redirect = directory.default_action(&current).map(str::to_string);
        if let Some(redirect) = &redirect {
            self.notifier.redirect_to(redirect);
        }

        Ok(StartOutcome::Redirected {
            state: current,
            action: redirect,
        })
    }

    /// Move from `from` to `to`.
    ///
    /// A self-transition always succeeds without touching the store.
    /// Otherwise `to` must be reachable from `from` through some declared
    /// event and the current state must still be `from`. On success the
    /// destination marker is written, then the current state; the result is
    /// whether the current state write succeeded.
    pub fn transition(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }

        if !self.transitions().can_reach(from, to) {
            tracing::trace!(from, to, "transition not declared");
            return false;
        }

        if self.current_state().as_deref() != Some(from) {
            tracing::trace!(from, to, current = ?self.current_state(), "stale origin state");
            return false;
        }

        let namespace = &self.config.namespace;
        if !self.store.write(&destination_state_key(namespace), to) {
            tracing::warn!(from, to, "failed to record destination state");
        }

        let committed = self.store.write(&current_state_key(namespace), to);
        if committed {
            tracing::debug!(namespace = %namespace, from, to, "transition committed");
        } else {
            tracing::warn!(namespace = %namespace, from, to, "failed to persist current state");
        }
        committed
    }

    /// Fire `event` from the current state.
    ///
    /// Returns `false` without side effects when the event declares nothing
    /// for the current state. When auto-redirect is enabled, a successful
    /// transition redirects to the destination state's action.
    pub fn fire_event(&mut self, event: &str) -> bool {
        let Some(current) = self.current_state() else {
            return false;
        };

        let Some(destination) = self
            .config
            .transitions
            .get(event)
            .and_then(|edges| edges.get(&current))
            .cloned()
        else {
            tracing::debug!(event, state = %current, "event not applicable");
            return false;
        };

        let moved = self.transition(&current, &destination);
        tracing::debug!(event, from = %current, to = %destination, moved, "event fired");

        if moved && self.config.auto_redirect {
            let directory = self.directory();
            let redirect = directory.default_action(&destination).map(str::to_string);
            if let Some(action) = redirect {
                self.notifier.redirect_to(&action);
            }
        }

        moved
    }

    /// The state store.
    pub fn store(&self) -> &St {
        &self.store
    }

    /// Mutable access to the state store.
    pub fn store_mut(&mut self) -> &mut St {
        &mut self.store
    }

    /// The notifier receiving denials and redirects.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the notifier.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Release the collaborators.
    pub fn into_parts(self) -> (MachineConfig, St, N) {
        (self.config, self.store, self.notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::notifier::{Notification, RecordingNotifier};
    use crate::engine::store::MemoryStore;

    fn checkout() -> MachineConfig {
        MachineConfig::builder()
            .state("signing in", vec!["sign_in", "new_user"])
            .state("billing", "billing")
            .state("paying", "payment")
            .state("reviewing", "summary")
            .state("processing", "fulfill")
            .transition("sign in", "signing in", "billing")
            .transition("sign in", "paying", "billing")
            .transition("sign in", "reviewing", "billing")
            .transition("bill & ship", "billing", "paying")
            .transition("pay", "billing", "paying")
            .transition("review", "paying", "reviewing")
            .transition("process", "reviewing", "processing")
            .build()
    }

    fn machine_in(state: &str) -> StateMachine<MemoryStore, RecordingNotifier> {
        let store = MemoryStore::new().with_entry("StateMachine.current_state", state);
        StateMachine::new(checkout(), store, RecordingNotifier::new())
    }

    #[test]
    fn start_without_states_reports_config_error() {
        let mut machine = StateMachine::new(
            MachineConfig::default(),
            MemoryStore::new(),
            RecordingNotifier::new(),
        );

        assert_eq!(machine.start(Some("edit")), Err(ConfigError::NoStates));
        assert!(machine.store().is_empty());
        assert!(machine.notifier().notifications().is_empty());
    }

    #[test]
    fn start_persists_default_for_fresh_subject() {
        let mut machine =
            StateMachine::new(checkout(), MemoryStore::new(), RecordingNotifier::new());

        let outcome = machine.start(None).unwrap();

        assert_eq!(
            outcome,
            StartOutcome::Idle {
                state: "signing in".to_string()
            }
        );
        assert_eq!(
            machine.config().default_state.as_deref(),
            Some("signing in")
        );
        let store = machine.store();
        assert_eq!(
            store.read("StateMachine.current_state").as_deref(),
            Some("signing in")
        );
    }

    #[test]
    fn start_keeps_existing_current_state() {
        let mut machine = machine_in("paying");

        machine.start(None).unwrap();

        assert_eq!(machine.current_state().as_deref(), Some("paying"));
    }

    #[test]
    fn start_on_invalid_transition_redirects_to_current_state_action() {
        let mut machine = machine_in("signing in");

        let outcome = machine.start(Some("summary")).unwrap();

        assert_eq!(
            outcome,
            StartOutcome::Redirected {
                state: "signing in".to_string(),
                action: Some("sign_in".to_string()),
            }
        );
        assert_eq!(
            machine.notifier().notifications(),
            [
                Notification::Denied(DENIED_MESSAGE.to_string()),
                Notification::Redirect("sign_in".to_string()),
            ]
        );
        assert_eq!(machine.current_state().as_deref(), Some("signing in"));
    }

    #[test]
    fn start_with_reachable_action_commits_transition() {
        let mut machine = machine_in("reviewing");

        let outcome = machine.start(Some("billing")).unwrap();

        assert_eq!(
            outcome,
            StartOutcome::Allowed {
                state: "billing".to_string()
            }
        );
        assert_eq!(machine.current_state().as_deref(), Some("billing"));
        assert!(machine.notifier().notifications().is_empty());
    }

    #[test]
    fn start_with_unknown_action_is_denied() {
        let mut machine = machine_in("billing");

        let outcome = machine.start(Some("refund")).unwrap();

        assert!(matches!(outcome, StartOutcome::Redirected { .. }));
        assert_eq!(machine.notifier().redirects(), vec!["billing"]);
        assert_eq!(machine.notifier().denials(), vec![DENIED_MESSAGE]);
    }

    #[test]
    fn explicit_default_state_is_used() {
        let mut config = checkout();
        config.default_state = Some("billing".to_string());
        let mut machine = StateMachine::new(config, MemoryStore::new(), RecordingNotifier::new());

        assert_eq!(machine.current_state().as_deref(), Some("billing"));
        machine.start(None).unwrap();
        let store = machine.store();
        assert_eq!(
            store.read("StateMachine.current_state").as_deref(),
            Some("billing")
        );
    }

    #[test]
    fn transition_writes_marker_then_state() {
        let mut machine = machine_in("signing in");

        assert!(machine.transition("signing in", "billing"));
        assert_eq!(machine.current_state().as_deref(), Some("billing"));
        let store = machine.store();
        assert_eq!(
            store.read("StateMachine.destination_state").as_deref(),
            Some("billing")
        );
    }

    #[test]
    fn invalid_transition_has_no_side_effects() {
        let mut machine = machine_in("signing in");

        assert!(!machine.transition("signing in", "invalid state"));
        assert!(!machine.transition("signing in", "processing"));
        assert!(!machine.store().exists("StateMachine.destination_state"));
        assert_eq!(machine.current_state().as_deref(), Some("signing in"));
    }

    #[test]
    fn transition_rejects_stale_origin() {
        let mut machine = machine_in("billing");

        assert!(!machine.transition("signing in", "billing"));
        assert!(!machine.store().exists("StateMachine.destination_state"));
    }

    #[test]
    fn self_transition_always_succeeds() {
        let mut machine = StateMachine::new(
            MachineConfig::default(),
            MemoryStore::read_only(),
            RecordingNotifier::new(),
        );

        assert!(machine.transition("anything", "anything"));
        assert!(machine.store().is_empty());
    }

    #[test]
    fn transition_reports_store_write_failure() {
        let store = MemoryStore::read_only().with_entry("StateMachine.current_state", "billing");
        let mut machine = StateMachine::new(checkout(), store, RecordingNotifier::new());

        assert!(!machine.transition("billing", "paying"));
        assert_eq!(machine.current_state().as_deref(), Some("billing"));
    }

    #[test]
    fn fire_event_moves_to_declared_destination() {
        let mut machine = machine_in("paying");

        assert!(machine.fire_event("sign in"));
        assert_eq!(machine.current_state().as_deref(), Some("billing"));
        assert!(machine.notifier().notifications().is_empty());
    }

    #[test]
    fn fire_event_not_applicable_in_current_state() {
        let mut machine = machine_in("processing");

        assert!(!machine.fire_event("pay"));
        assert!(!machine.fire_event("invalid event"));
        assert_eq!(machine.current_state().as_deref(), Some("processing"));
    }

    #[test]
    fn fire_event_with_auto_redirect() {
        let mut config = checkout();
        config.auto_redirect = true;
        let store = MemoryStore::new().with_entry("StateMachine.current_state", "signing in");
        let mut machine = StateMachine::new(config, store, RecordingNotifier::new());

        assert!(machine.fire_event("sign in"));
        assert_eq!(machine.notifier().redirects(), vec!["billing"]);
    }

    #[test]
    fn fire_event_auto_redirect_gated_on_transition_success() {
        let mut config = checkout();
        config.auto_redirect = true;
        let store = MemoryStore::read_only().with_entry("StateMachine.current_state", "signing in");
        let mut machine = StateMachine::new(config, store, RecordingNotifier::new());

        assert!(!machine.fire_event("sign in"));
        assert!(machine.notifier().redirects().is_empty());
    }

    #[test]
    fn set_current_state_is_unchecked() {
        let mut machine = machine_in("billing");

        assert!(machine.set_current_state("nowhere"));
        assert_eq!(machine.current_state().as_deref(), Some("nowhere"));
    }

    #[test]
    fn declared_events_in_order() {
        let machine = machine_in("billing");

        assert_eq!(
            machine.declared_events(),
            vec!["sign in", "bill & ship", "pay", "review", "process"]
        );
    }

    #[test]
    fn namespaces_isolate_machines_in_shared_store() {
        let mut store = MemoryStore::new();
        {
            let config = MachineConfig::builder()
                .state("a", "x")
                .state("b", "y")
                .transition("go", "a", "b")
                .namespace("First")
                .build();
            let mut first = StateMachine::new(config, &mut store, RecordingNotifier::new());
            first.start(None).unwrap();
            assert!(first.fire_event("go"));
        }

        let config = MachineConfig::builder()
            .state("a", "x")
            .state("b", "y")
            .namespace("Second")
            .build();
        let second = StateMachine::new(config, &mut store, RecordingNotifier::new());
        assert_eq!(second.current_state().as_deref(), Some("a"));
        drop(second);

        assert_eq!(store.read("First.current_state").as_deref(), Some("b"));
    }

    #[test]
    fn configure_replaces_configuration() {
        let mut machine = StateMachine::new(
            MachineConfig::default(),
            MemoryStore::new(),
            RecordingNotifier::new(),
        );
        assert!(machine.start(None).is_err());

        machine.configure(checkout());

        assert!(machine.start(None).is_ok());
        assert_eq!(machine.states().len(), 5);
    }
}
