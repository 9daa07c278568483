//! User-facing outcome notifications (the toast surface).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::core::constants::{NOTIFICATION_HISTORY_LIMIT, NOTIFICATION_TTL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Option<NotificationVariant>,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: None,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Some(NotificationVariant::Destructive),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == Some(NotificationVariant::Destructive)
    }

    pub fn name_saved() -> Self {
        Self::info("Saved", "Name updated")
    }

    pub fn avatar_updated() -> Self {
        Self::info("Success!", "Avatar updated")
    }

    pub fn avatar_upload_failed() -> Self {
        Self::destructive("Error", "Could not upload avatar")
    }

    pub fn invalid_image() -> Self {
        Self::destructive("Error", "Choose an image")
    }

    pub fn background_changed(name: impl Into<String>) -> Self {
        Self::info("Background changed", name)
    }

    pub fn background_reset() -> Self {
        Self::info("Background reset", "Using the default background")
    }
}

#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    shown_at: Instant,
}

/// Recent notifications, oldest first, plus the ones still on screen.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    history: VecDeque<Notification>,
    visible: VecDeque<Toast>,
    ttl: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(NOTIFICATION_TTL)
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            history: VecDeque::new(),
            visible: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        if self.history.len() == NOTIFICATION_HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(notification.clone());
        self.visible.push_back(Toast {
            notification,
            shown_at: now,
        });
    }

    pub fn history(&self) -> &VecDeque<Notification> {
        &self.history
    }

    pub fn last(&self) -> Option<&Notification> {
        self.history.back()
    }

    /// Newest toast that has not expired yet.
    pub fn current(&self, now: Instant) -> Option<&Notification> {
        self.visible
            .iter()
            .rev()
            .find(|toast| now.duration_since(toast.shown_at) < self.ttl)
            .map(|toast| &toast.notification)
    }

    /// Drop expired toasts. Returns true when something was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.visible.len();
        let ttl = self.ttl;
        self.visible
            .retain(|toast| now.duration_since(toast.shown_at) < ttl);
        before != self.visible.len()
    }

    pub fn dismiss(&mut self) {
        self.visible.clear();
    }
}
