//! Event System
//!
//! Activity events emitted while talking to the backend. The TUI shows them in
//! the activity log; headless mode prints them.

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

/// Which part of the controller produced an event.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    Stats,
    Listings,
    Detail,
    Health,
    Reprocess,
    SystemControl,
    Session,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn success(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Success, LogLevel::Info)
    }

    pub fn refresh(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Refresh, LogLevel::Debug)
    }

    pub fn info(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Info, LogLevel::Info)
    }

    pub fn error(source: Source, msg: impl Into<String>, log_level: LogLevel) -> Self {
        Self::new(source, msg.into(), EventType::Error, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}
