//! Notification and redirect collaborator.
//!
//! The engine decides *that* a caller should be told something or sent
//! elsewhere; the hosting code decides how.

/// Receives the engine's user-facing outcomes.
pub trait Notifier {
    /// The current action is not accessible from the current state.
    fn notify_denied(&mut self, message: &str);

    /// The caller should continue at `action`.
    fn redirect_to(&mut self, action: &str);
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn notify_denied(&mut self, message: &str) {
        (**self).notify_denied(message)
    }

    fn redirect_to(&mut self, action: &str) {
        (**self).redirect_to(action)
    }
}

/// A single outcome captured by [`RecordingNotifier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Denied(String),
    Redirect(String),
}

/// Notifier that keeps every outcome in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    notifications: Vec<Notification>,
}

impl RecordingNotifier {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured outcome, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Actions redirected to, oldest first.
    pub fn redirects(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Redirect(action) => Some(action.as_str()),
                Notification::Denied(_) => None,
            })
            .collect()
    }

    /// Denial messages, oldest first.
    pub fn denials(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Denied(message) => Some(message.as_str()),
                Notification::Redirect(_) => None,
            })
            .collect()
    }

    /// Forget captured outcomes.
    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify_denied(&mut self, message: &str) {
        self.notifications.push(Notification::Denied(message.to_string()));
    }

    fn redirect_to(&mut self, action: &str) {
        self.notifications.push(Notification::Redirect(action.to_string()));
    }
}

/// Notifier that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify_denied(&mut self, _message: &str) {}

    fn redirect_to(&mut self, _action: &str) {}
}
