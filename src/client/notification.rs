use std::time::{Duration, Instant};

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const ERROR_MESSAGE: &str = "Sorry, there was an error sending your message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: &'static str,
    pub shown_at: Instant,
}

impl Notification {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < NOTIFICATION_TTL
    }
}

/// Transient toasts. Showing one never blocks the form.
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn show(&mut self, kind: NotificationKind, now: Instant) {
        let message = match kind {
            NotificationKind::Success => SUCCESS_MESSAGE,
            NotificationKind::Error => ERROR_MESSAGE,
        };

        self.prune(now);
        self.items.push(Notification {
            kind,
            message,
            shown_at: now,
        });
    }

    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.items
            .iter()
            .filter(move |notification| notification.is_visible_at(now))
    }

    /// Drops notifications whose time on screen is over
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|item| item.is_visible_at(now));
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }
}
