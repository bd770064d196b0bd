//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use crate::listing::{ListingStatus, StatusLabel, SystemStatus};
use ratatui::prelude::Color;

/// Icon, text and colour of a status badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub icon: &'static str,
    pub text: String,
    pub color: Color,
}

/// Badge for a listing status. Statuses the client does not know get a neutral
/// badge carrying the raw label.
pub fn status_badge(status: &StatusLabel) -> Badge {
    let (icon, color) = match status {
        StatusLabel::Known(ListingStatus::New) => ("●", Color::LightBlue),
        StatusLabel::Known(ListingStatus::Successful) => ("✓", Color::Green),
        StatusLabel::Known(ListingStatus::Pending) => ("◷", Color::Yellow),
        StatusLabel::Known(ListingStatus::Failed) => ("✗", Color::Red),
        StatusLabel::Known(ListingStatus::Duplicate) => ("⧉", Color::Magenta),
        StatusLabel::Known(ListingStatus::Multiple) => ("≡", Color::Cyan),
        StatusLabel::Unrecognized(_) => ("?", Color::Gray),
    };
    let text = match status {
        StatusLabel::Known(known) => known.to_string(),
        StatusLabel::Unrecognized(raw) if raw.trim().is_empty() => "Unknown".to_string(),
        StatusLabel::Unrecognized(raw) => format!("Unknown ({})", raw),
    };
    Badge { icon, text, color }
}

/// Label and colour of the system status indicator.
pub fn system_status_visual(status: SystemStatus) -> (&'static str, Color) {
    match status {
        SystemStatus::Running => ("System running", Color::Green),
        SystemStatus::Stopped => ("System stopped", Color::Yellow),
        SystemStatus::Unreachable => ("Disconnected", Color::Red),
    }
}

/// Get a ratatui color for the part of the dashboard an event came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Stats => Color::Cyan,
        Source::Listings => Color::LightBlue,
        Source::Detail => Color::Blue,
        Source::Health => Color::Magenta,
        Source::Reprocess => Color::Yellow,
        Source::SystemControl => Color::LightYellow,
        Source::Session => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // "YYYY-MM-DD HH:MM:SS" -> "MM-DD HH:MM:SS"
    match (timestamp.get(5..10), timestamp.get(11..19)) {
        (Some(month_day), Some(time)) => format!("{} {}", month_day, time),
        _ => timestamp.to_string(),
    }
}

/// Cuts `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
