//! Notifications ("toasts") raised by the approval console.
//!
//! The list component never prints anything itself. It hands notifications
//! to a `Notifier`, which the CLI prints to stderr and the interactive
//! console shows in its status line.

use chrono::{DateTime, Utc};
use colored::Colorize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to stderr, one line each.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => eprintln!("  {} {}", "✓".green().bold(), notification.message),
            Level::Error => eprintln!("  {} {}", "✗".red().bold(), notification.message),
        }
    }
}

/// In-memory notification buffer. Cloning shares the buffer.
#[derive(Clone, Default)]
pub struct NotificationQueue {
    inner: Arc<Mutex<VecDeque<Notification>>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        match self.inner.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }

    /// Copy of everything queued so far, without removing it.
    pub fn snapshot(&self) -> Vec<Notification> {
        match self.inner.lock() {
            Ok(queue) => queue.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        let mut queue = match self.inner.lock() {
            Ok(queue) => queue,
            Err(poisoned) => poisoned.into_inner(),
        };
        queue.push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_order() {
        let queue = NotificationQueue::new();
        let shared = queue.clone();
        shared.notify(Notification::success("one"));
        shared.notify(Notification::error("two"));

        assert_eq!(queue.snapshot().len(), 2);
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "one");
        assert!(!drained[0].is_error());
        assert!(drained[1].is_error());
        assert!(queue.drain().is_empty());
    }
}
