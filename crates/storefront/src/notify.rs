//! User-facing notifications ("toasts") emitted by session operations.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    /// Removal and failure messages.
    Destructive,
}

/// A short message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: Variant::Destructive,
            ..Self::new(title, description)
        }
    }
}

/// Sink for notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Buffers notifications so the caller can render them.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl CollectingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered notification, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_notifier_drains_in_order() {
        let notifier = CollectingNotifier::new();
        let handle = notifier.clone();
        notifier.notify(Notification::new("One", "first"));
        notifier.notify(Notification::destructive("Two", "second"));

        let drained = handle.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained.first().map(|n| n.variant), Some(Variant::Default));
        assert_eq!(drained.get(1).map(|n| n.variant), Some(Variant::Destructive));
        assert!(notifier.drain().is_empty());
    }
}
