//! Transient notifications ("toasts").

use crate::consts::cli_consts::timing::notification_ttl;
use ratatui::prelude::Color;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Upper bound on toasts kept at once; older ones are dropped first.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn color(&self) -> Color {
        match self {
            NotificationKind::Info => Color::LightBlue,
            NotificationKind::Success => Color::Green,
            NotificationKind::Warning => Color::Yellow,
            NotificationKind::Error => Color::Red,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "ℹ",
            NotificationKind::Success => "✓",
            NotificationKind::Warning => "⚠",
            NotificationKind::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= self.ttl
    }
}

#[derive(Debug, Default)]
pub struct Notifications {
    active: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        if self.active.len() >= MAX_VISIBLE {
            self.active.pop_front();
        }
        self.active.push_back(Notification {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            ttl: notification_ttl(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message);
    }

    /// Drops notifications whose lifetime has passed.
    pub fn expire(&mut self, now: Instant) {
        self.active.retain(|n| !n.is_expired(now));
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().rev()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notification> {
        self.active.back()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
